use super::http::ServiceClient;
use crate::models::Recommendation;
use crate::utils::AppError;

// ==================== REVIEW SERVICE ====================

const REVIEW_PATH: &str = "/api/review";

pub async fn get_all_recommendations(
    client: &ServiceClient,
) -> Result<Vec<Recommendation>, AppError> {
    log::info!("⭐ Fetching all recommendations");
    let path = format!("{}/recommendations?name=all", REVIEW_PATH);
    let recommendations: Vec<Recommendation> =
        client.get_json(&path, "fetch recommendations").await?;
    log::info!("✅ Retrieved {} recommendations", recommendations.len());
    Ok(recommendations)
}

pub async fn get_recommendations_by_user(
    client: &ServiceClient,
    user_id: i64,
) -> Result<Vec<Recommendation>, AppError> {
    let path = format!("{}/recommendations?userId={}", REVIEW_PATH, user_id);
    client.get_json(&path, "fetch user recommendations").await
}

/// The review service takes user, product and rating in the URL; no body.
pub async fn create_recommendation(
    client: &ServiceClient,
    user_id: i64,
    product_id: i64,
    rating: i32,
) -> Result<Recommendation, AppError> {
    log::info!(
        "➕ Creating recommendation: user {} rates product {} with {}",
        user_id,
        product_id,
        rating
    );
    let path = format!(
        "{}/{}/recommendations/{}?rating={}",
        REVIEW_PATH, user_id, product_id, rating
    );
    client.post_empty(&path, "create recommendation").await
}

pub async fn delete_recommendation(client: &ServiceClient, id: i64) -> Result<(), AppError> {
    log::info!("🗑️  Deleting recommendation {}", id);
    client
        .delete(
            &format!("{}/recommendations/{}", REVIEW_PATH, id),
            "delete recommendation",
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockCollaborators;

    #[actix_web::test]
    async fn test_create_and_list_by_user() {
        let mock = MockCollaborators::start().await;
        let client = mock.client();

        let created = create_recommendation(&client, 2, 3, 4).await.unwrap();
        assert_eq!(created.rating, 4);
        assert_eq!(created.user.id, 2);
        assert_eq!(created.product.id, 3);

        let by_user = get_recommendations_by_user(&client, 2).await.unwrap();
        assert!(by_user.iter().any(|r| r.id == created.id));
        assert!(by_user.iter().all(|r| r.user.id == 2));

        delete_recommendation(&client, created.id).await.unwrap();
        let all = get_all_recommendations(&client).await.unwrap();
        assert!(all.iter().all(|r| r.id != created.id));
    }

    #[actix_web::test]
    async fn test_create_for_unknown_user_fails() {
        let mock = MockCollaborators::start().await;
        let result = create_recommendation(&mock.client(), 404, 1, 5).await;
        assert!(result.is_err());
    }
}

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::models::{Recommendation, User, UserDetails};
use crate::pages::layout::{page, see_other, stars};
use crate::services::{recommendation_service, user_service};
use crate::state::AppState;
use crate::utils::html::escape;

const PROFILE_PATH: &str = "/profile";

#[derive(Debug, Default, Deserialize)]
pub struct ProfileQuery {
    pub edit: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl ProfileForm {
    /// Applies the draft over `details`, keeping the details id.
    pub fn merge_into(self, details: &UserDetails) -> UserDetails {
        let optional = |value: String| {
            let value = value.trim().to_string();
            (!value.is_empty()).then_some(value)
        };
        UserDetails {
            id: details.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: optional(self.phone),
            address: optional(self.address),
        }
    }
}

fn role_badge(user: &User) -> String {
    let role = user
        .role
        .as_ref()
        .map(|role| role.role_name.as_str())
        .unwrap_or("USER");
    format!("<span class=\"button primary\">{}</span>", escape(role))
}

fn detail_row(label: &str, value: &str) -> String {
    let value = if value.is_empty() { "Not provided" } else { value };
    format!("<p><span class=\"muted\">{}:</span> {}</p>\n", label, escape(value))
}

fn render_reviews(reviews: &[Recommendation]) -> String {
    let mut html = String::from("<section class=\"panel\"><h2>My Reviews</h2>\n");
    if reviews.is_empty() {
        html.push_str("<p class=\"empty\">You have not reviewed any products yet.</p>\n");
    }
    for review in reviews {
        html.push_str(&format!(
            "<p>{} <span class=\"stars\">{}</span></p>\n",
            escape(&review.product.product_name),
            stars(i64::from(review.rating))
        ));
    }
    html.push_str("</section>\n");
    html
}

async fn fetch_reviews(state: &AppState) -> Vec<Recommendation> {
    match recommendation_service::get_recommendations_by_user(&state.client, state.profile_user_id)
        .await
    {
        Ok(reviews) => reviews,
        Err(e) => {
            log::error!("❌ Error loading reviews for user {}: {}", state.profile_user_id, e);
            Vec::new()
        }
    }
}

fn render_view(user: &User) -> String {
    let mut html = format!(
        "<section class=\"panel\"><div class=\"panel-head\"><h2>{}</h2>{}</div>\n<p class=\"muted\">@{}</p>\n",
        escape(&user.full_name()),
        role_badge(user),
        escape(&user.user_name)
    );
    match &user.user_details {
        Some(details) => {
            html.push_str(&detail_row("First Name", &details.first_name));
            html.push_str(&detail_row("Last Name", &details.last_name));
            html.push_str(&detail_row("Email", &details.email));
            html.push_str(&detail_row("Phone", details.phone.as_deref().unwrap_or_default()));
            html.push_str(&detail_row("Address", details.address.as_deref().unwrap_or_default()));
        }
        None => html.push_str("<p class=\"muted\">No profile details on file.</p>\n"),
    }
    html.push_str(&format!(
        "<p>Status: {}</p>\n<a class=\"button\" href=\"{}?edit=1\">Edit Profile</a></section>\n",
        if user.is_active() { "Active" } else { "Inactive" },
        PROFILE_PATH
    ));
    html
}

fn render_edit(user: &User) -> String {
    let details = user.user_details.clone().unwrap_or_default();
    let input = |name: &str, label: &str, kind: &str, value: &str| {
        format!(
            "<label>{}<input type=\"{}\" name=\"{}\" value=\"{}\"></label>\n",
            label,
            kind,
            name,
            escape(value)
        )
    };

    let mut html = format!(
        "<section class=\"panel modal\"><h2>Edit Profile</h2>\n<form method=\"post\" action=\"{}\">\n",
        PROFILE_PATH
    );
    html.push_str(&input("firstName", "First Name", "text", &details.first_name));
    html.push_str(&input("lastName", "Last Name", "text", &details.last_name));
    html.push_str(&input("email", "Email", "email", &details.email));
    html.push_str(&input("phone", "Phone", "text", details.phone.as_deref().unwrap_or_default()));
    html.push_str(&format!(
        "<label>Address<textarea name=\"address\">{}</textarea></label>\n",
        escape(details.address.as_deref().unwrap_or_default())
    ));
    html.push_str(&format!(
        "<button class=\"primary\" type=\"submit\">Save</button> <a class=\"button\" href=\"{}\">Cancel</a>\n</form></section>\n",
        PROFILE_PATH
    ));
    html
}

/// Profile user with any details saved this session applied.
async fn load_profile(state: &AppState) -> Option<User> {
    let mut user = match user_service::get_user_by_id(&state.client, state.profile_user_id).await {
        Ok(user) => user,
        Err(e) => {
            log::error!("❌ Error loading profile: {}", e);
            return None;
        }
    };

    if let Some(saved) = state.profile_details.lock().await.clone() {
        user.user_details = Some(saved);
    }
    Some(user)
}

/// GET /profile (`?edit=1` opens the edit form)
pub async fn profile_page(
    state: web::Data<AppState>,
    query: web::Query<ProfileQuery>,
) -> HttpResponse {
    log::info!("👤 GET {}", PROFILE_PATH);
    let body = match load_profile(&state).await {
        Some(user) if query.edit.is_some() => render_edit(&user),
        Some(user) => {
            let reviews = fetch_reviews(&state).await;
            format!("{}{}", render_view(&user), render_reviews(&reviews))
        }
        None => "<section class=\"panel\"><h2>User not found</h2>\
                 <p class=\"muted\">The profile could not be loaded.</p></section>\n"
            .to_string(),
    };
    page("Profile", &format!("<h1>My Profile</h1>\n{}", body))
}

/// POST /profile
///
/// Kept for this session only; nothing is sent to the accounts service.
pub async fn save_profile(
    state: web::Data<AppState>,
    form: web::Form<ProfileForm>,
) -> HttpResponse {
    match load_profile(&state).await {
        Some(User {
            user_details: Some(details),
            ..
        }) => {
            let merged = form.into_inner().merge_into(&details);
            *state.profile_details.lock().await = Some(merged);
            log::info!("✅ Profile details updated for this session");
        }
        Some(_) => log::warn!("⚠️  Profile has no details to update"),
        None => {}
    }
    see_other(PROFILE_PATH)
}

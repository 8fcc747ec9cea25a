use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::components::{
    Column, ConfirmOutcome, DeleteConfirm, EditAction, FormField, FormModal, SelectOption, Table,
};
use crate::models::User;
use crate::pages::layout::{page, see_other};
use crate::pages::ModalQuery;
use crate::services::user_service;
use crate::state::{AppState, ResourceTable};
use crate::utils::html::escape;

const BASE_PATH: &str = "/admin/users";

fn text_or(value: Option<&Value>, fallback: &str) -> String {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn columns() -> Vec<Column<User>> {
    vec![
        Column::path("id", "ID"),
        Column::path("userName", "Username"),
        Column::path("userDetails.email", "Email").render(|v, _| text_or(v, "N/A")),
        Column::path("userDetails.firstName", "First Name").render(|v, _| text_or(v, "N/A")),
        Column::path("userDetails.lastName", "Last Name").render(|v, _| text_or(v, "N/A")),
        Column::path("role.roleName", "Role").render(|v, _| text_or(v, "USER")),
        Column::field("Status", |user: &User| Some(Value::from(user.is_active()))).render(
            |v, _| {
                if v.and_then(Value::as_bool).unwrap_or(false) {
                    "Active".to_string()
                } else {
                    "Inactive".to_string()
                }
            },
        ),
    ]
}

// The userDetails.* names submit as flat keys; the accounts service does
// not read them back into the nested details object.
fn form_fields(editing: bool) -> Vec<FormField> {
    vec![
        FormField::text("userName", "Username").required(true),
        FormField::text("userPassword", "Password").required(!editing),
        FormField::text("userDetails.firstName", "First Name"),
        FormField::text("userDetails.lastName", "Last Name"),
        FormField::email("userDetails.email", "Email"),
        FormField::text("userDetails.phoneNumber", "Phone").placeholder("+1-555-0100"),
        FormField::select(
            "active",
            "Status",
            vec![SelectOption::new(1, "Active"), SelectOption::new(0, "Inactive")],
        ),
    ]
}

fn table() -> Table<User> {
    Table::new("Users Management", BASE_PATH, columns())
        .with_edit(EditAction::OpenForm)
        .with_delete()
        .with_create()
}

#[derive(Debug, Default, Deserialize)]
pub struct UserLookup {
    pub name: Option<String>,
}

impl UserLookup {
    fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }
}

fn lookup_form(lookup: &UserLookup) -> String {
    format!(
        "<form class=\"panel\" method=\"get\" action=\"{0}\"><input type=\"text\" name=\"name\" placeholder=\"Find by username\" value=\"{1}\"> \
         <button type=\"submit\">Find</button> <a class=\"button\" href=\"{0}\">Show all</a></form>\n",
        BASE_PATH,
        escape(lookup.name().unwrap_or_default())
    )
}

/// Exact username lookup; an unknown name lists nothing.
async fn find_user(state: &AppState, name: &str) -> Vec<User> {
    match user_service::get_user_by_name(&state.client, name).await {
        Ok(user) => vec![user],
        Err(e) => {
            log::warn!("⚠️  No user named {}: {}", name, e);
            Vec::new()
        }
    }
}

async fn fetch_users(state: &AppState) -> Vec<User> {
    match user_service::get_all_users(&state.client).await {
        Ok(users) => users,
        Err(e) => {
            log::error!("❌ Failed to fetch users: {}", e);
            Vec::new()
        }
    }
}

async fn render(state: &AppState, users: &[User], modal: Option<(FormModal, String)>) -> HttpResponse {
    render_with_lookup(state, users, modal, &UserLookup::default()).await
}

async fn render_with_lookup(
    state: &AppState,
    users: &[User],
    modal: Option<(FormModal, String)>,
    lookup: &UserLookup,
) -> HttpResponse {
    let armed = state.armed_row(ResourceTable::Users).await;
    let mut body = lookup_form(lookup);
    body.push_str(&table().render_html(users, armed));
    if let Some((modal, action)) = modal {
        body.push_str(&modal.render_html(&action, BASE_PATH));
    }
    page("Users Management", &body)
}

/// GET /admin/users
pub async fn users_page(
    state: web::Data<AppState>,
    query: web::Query<ModalQuery>,
    lookup: web::Query<UserLookup>,
) -> HttpResponse {
    log::info!("👥 GET {}", BASE_PATH);
    let users = match lookup.name() {
        Some(name) => find_user(&state, name).await,
        None => fetch_users(&state).await,
    };

    let modal = if let Some(id) = query.edit {
        users.iter().find(|u| u.id == id).and_then(|user| {
            let initial = serde_json::to_value(user).ok()?;
            Some((
                FormModal::open_with("Edit User", form_fields(true), &initial),
                format!("{}/{}/save", BASE_PATH, id),
            ))
        })
    } else if query.wants_create() {
        Some((
            FormModal::open("Create User", form_fields(false)),
            format!("{}/save", BASE_PATH),
        ))
    } else {
        None
    };

    render_with_lookup(&state, &users, modal, &lookup).await
}

/// POST /admin/users/save
pub async fn create_user(
    state: web::Data<AppState>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let submitted = FormModal::collect(&form_fields(false), &form);
    match user_service::create_user(&state.client, &submitted).await {
        Ok(_) => see_other(BASE_PATH),
        Err(e) => {
            log::error!("❌ Failed to save user: {}", e);
            let users = fetch_users(&state).await;
            let modal = FormModal::reopen("Create User", form_fields(false), submitted, false);
            render(&state, &users, Some((modal, format!("{}/save", BASE_PATH)))).await
        }
    }
}

/// POST /admin/users/{id}/save
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<HashMap<String, String>>,
) -> HttpResponse {
    let id = path.into_inner();
    let submitted = FormModal::collect(&form_fields(true), &form);
    match user_service::update_user(&state.client, id, &submitted).await {
        Ok(_) => see_other(BASE_PATH),
        Err(e) => {
            log::error!("❌ Failed to save user {}: {}", id, e);
            let users = fetch_users(&state).await;
            let modal = FormModal::reopen("Edit User", form_fields(true), submitted, true);
            render(&state, &users, Some((modal, format!("{}/{}/save", BASE_PATH, id)))).await
        }
    }
}

/// POST /admin/users/{id}/delete
pub async fn delete_user(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    let id = path.into_inner();
    let outcome = state
        .with_confirm(ResourceTable::Users, |confirm| confirm.activate(id))
        .await;

    if let ConfirmOutcome::Fire(id) = outcome {
        if let Err(e) = user_service::delete_user(&state.client, id).await {
            log::error!("❌ Failed to delete user {}: {}", id, e);
        }
    }
    see_other(BASE_PATH)
}

/// POST /admin/users/delete/cancel
pub async fn cancel_delete(state: web::Data<AppState>) -> HttpResponse {
    state
        .with_confirm(ResourceTable::Users, DeleteConfirm::disarm)
        .await;
    see_other(BASE_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages;
    use crate::test_support::{sample_users, MockCollaborators};
    use actix_web::test::{call_and_read_body, call_service, init_service, TestRequest};
    use actix_web::{http::StatusCode, App};

    #[test]
    fn test_columns_fall_back_for_missing_details() {
        let users = sample_users();
        let rows = table().rows(&users, None);

        assert_eq!(
            rows[1].cells,
            vec!["2", "janesmith", "jane.smith@example.com", "Jane", "Smith", "PREMIUM_USER", "Active"]
        );
        assert_eq!(
            rows[2].cells,
            vec!["3", "mikejohnson", "N/A", "N/A", "N/A", "USER", "Inactive"]
        );
    }

    #[test]
    fn test_password_required_only_on_create() {
        let create = form_fields(false);
        let edit = form_fields(true);
        let password = |fields: &[FormField]| {
            fields.iter().find(|f| f.name == "userPassword").map(|f| f.required)
        };
        assert_eq!(password(&create), Some(true));
        assert_eq!(password(&edit), Some(false));
    }

    #[actix_web::test]
    async fn test_page_lists_users() {
        let mock = MockCollaborators::start().await;
        let state = web::Data::new(AppState::new(mock.client(), 1, None));
        let app = init_service(App::new().app_data(state.clone()).configure(pages::configure)).await;

        let req = TestRequest::get().uri("/admin/users").to_request();
        let html = String::from_utf8(call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(html.contains("sarahwilliams"));
        assert!(html.contains("ADMIN"));
        assert!(html.contains("href=\"/admin/users?edit=4\""));
    }

    #[actix_web::test]
    async fn test_lookup_by_username() {
        let mock = MockCollaborators::start().await;
        let state = web::Data::new(AppState::new(mock.client(), 1, None));
        let app = init_service(App::new().app_data(state.clone()).configure(pages::configure)).await;

        let req = TestRequest::get().uri("/admin/users?name=janesmith").to_request();
        let html = String::from_utf8(call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(html.contains("data-id=\"2\""));
        assert!(!html.contains("data-id=\"1\""));
        assert!(html.contains("value=\"janesmith\""));

        let req = TestRequest::get().uri("/admin/users?name=nobody").to_request();
        let html = String::from_utf8(call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(html.contains("No users management found"));
    }

    #[actix_web::test]
    async fn test_create_user_sends_flat_fields() {
        let mock = MockCollaborators::start().await;
        let state = web::Data::new(AppState::new(mock.client(), 1, None));
        let app = init_service(App::new().app_data(state.clone()).configure(pages::configure)).await;

        let req = TestRequest::post()
            .uri("/admin/users/save")
            .set_form([
                ("userName", "newbie"),
                ("userPassword", "pw"),
                ("userDetails.email", "newbie@example.com"),
                ("active", "0"),
            ])
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let users = user_service::get_all_users(&state.client).await.unwrap();
        let created = users.iter().find(|u| u.user_name == "newbie").unwrap();
        assert!(!created.is_active());
        // Flat dotted keys do not become nested details
        assert!(created.user_details.is_none());
    }
}

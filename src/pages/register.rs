use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::models::{Registration, UserDetails};
use crate::pages::layout::{page, see_other};
use crate::services::user_service;
use crate::state::AppState;
use crate::utils::html::escape;

const REGISTER_PATH: &str = "/register";

#[derive(Debug, Default, Deserialize)]
pub struct RegisterQuery {
    pub welcome: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl RegisterForm {
    pub fn to_registration(&self) -> Registration {
        Registration {
            user_name: self.user_name.trim().to_string(),
            user_password: self.user_password.clone(),
            active: 1,
            user_details: UserDetails {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email: self.email.trim().to_string(),
                ..UserDetails::default()
            },
        }
    }
}

fn render_form(form: &RegisterForm, error: Option<&str>) -> String {
    let input = |name: &str, label: &str, kind: &str, value: &str, required: bool| {
        format!(
            "<label>{}{}<input type=\"{}\" name=\"{}\" value=\"{}\"{}></label>\n",
            label,
            if required { " <span class=\"required\">*</span>" } else { "" },
            kind,
            name,
            escape(value),
            if required { " required" } else { "" }
        )
    };

    let mut html = String::from("<section class=\"panel modal\"><h2>Create Account</h2>\n");
    if let Some(error) = error {
        html.push_str(&format!("<p class=\"danger\">{}</p>\n", escape(error)));
    }
    html.push_str(&format!("<form method=\"post\" action=\"{}\">\n", REGISTER_PATH));
    html.push_str(&input("userName", "Username", "text", &form.user_name, true));
    // The password is never echoed back
    html.push_str(&input("userPassword", "Password", "password", "", true));
    html.push_str(&input("firstName", "First Name", "text", &form.first_name, false));
    html.push_str(&input("lastName", "Last Name", "text", &form.last_name, false));
    html.push_str(&input("email", "Email", "email", &form.email, false));
    html.push_str("<button class=\"primary\" type=\"submit\">Sign Up</button>\n</form></section>\n");
    html
}

/// GET /register
pub async fn register_page(query: web::Query<RegisterQuery>) -> HttpResponse {
    let body = match &query.welcome {
        Some(name) => format!(
            "<section class=\"panel\"><h2>Welcome, {}!</h2><p class=\"muted\">Your account has been created.</p>\
             <a class=\"button primary\" href=\"/products\">Start Shopping</a></section>\n",
            escape(name)
        ),
        None => render_form(&RegisterForm::default(), None),
    };
    page("Sign Up", &body)
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    form: web::Form<RegisterForm>,
) -> HttpResponse {
    let registration = form.to_registration();
    if registration.user_name.is_empty() || registration.user_password.is_empty() {
        return page(
            "Sign Up",
            &render_form(&form, Some("Username and password are required.")),
        );
    }

    match user_service::register_user(&state.client, &registration).await {
        Ok(user) => {
            log::info!("✅ Registered user {}", user.user_name);
            see_other(&format!(
                "{}?welcome={}",
                REGISTER_PATH,
                urlencoding::encode(&user.user_name)
            ))
        }
        Err(e) => {
            log::error!("❌ Registration failed: {}", e);
            page(
                "Sign Up",
                &render_form(&form, Some("Registration failed. The username may already be taken.")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages;
    use crate::test_support::MockCollaborators;
    use actix_web::test::{call_service, init_service, read_body, TestRequest};
    use actix_web::{http::header, http::StatusCode, App};

    #[test]
    fn test_registration_body() {
        let form = RegisterForm {
            user_name: " alice ".to_string(),
            user_password: "secret".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            email: "alice@example.com".to_string(),
        };
        let body = serde_json::to_value(form.to_registration()).unwrap();
        assert_eq!(body["userName"], "alice");
        assert_eq!(body["active"], 1);
        assert_eq!(body["userDetails"]["firstName"], "Alice");
        assert_eq!(body["userDetails"]["email"], "alice@example.com");
    }

    #[actix_web::test]
    async fn test_register_creates_account() {
        let mock = MockCollaborators::start().await;
        let state = web::Data::new(AppState::new(mock.client(), 1, None));
        let app = init_service(App::new().app_data(state.clone()).configure(pages::configure)).await;

        let req = TestRequest::post()
            .uri("/register")
            .set_form([
                ("userName", "alice"),
                ("userPassword", "secret"),
                ("firstName", "Alice"),
                ("lastName", "Liddell"),
                ("email", "alice@example.com"),
            ])
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/register?welcome=alice"
        );

        let user = user_service::get_user_by_name(&state.client, "alice").await.unwrap();
        assert_eq!(user.full_name(), "Alice Liddell");
    }

    #[actix_web::test]
    async fn test_taken_username_shows_error() {
        let mock = MockCollaborators::start().await;
        let state = web::Data::new(AppState::new(mock.client(), 1, None));
        let app = init_service(App::new().app_data(state.clone()).configure(pages::configure)).await;

        let req = TestRequest::post()
            .uri("/register")
            .set_form([("userName", "johndoe"), ("userPassword", "pw")])
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = String::from_utf8(read_body(resp).await.to_vec()).unwrap();
        assert!(html.contains("Registration failed"));
        assert!(html.contains("value=\"johndoe\""));
    }
}

use actix_web::{http::header, HttpResponse};

use crate::utils::html::escape;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #111418; color: #d8dce2; }
header { display: flex; gap: 1.2rem; align-items: center; padding: 0.9rem 2rem; background: #1b2027; }
header a { color: #d4af37; text-decoration: none; }
main { padding: 1.5rem 2rem; max-width: 1100px; margin: 0 auto; }
table { width: 100%; border-collapse: collapse; }
th { text-align: left; color: #d4af37; }
th, td { padding: 0.5rem 0.75rem; border-bottom: 1px solid #2b313a; }
.panel { background: #1b2027; border-radius: 10px; padding: 1.2rem; margin-bottom: 1.2rem; }
.panel-head { display: flex; justify-content: space-between; align-items: center; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(230px, 1fr)); gap: 1rem; }
.button, button { display: inline-block; padding: 0.35rem 0.8rem; border-radius: 6px; border: 1px solid #3a414c; background: #232931; color: #d8dce2; cursor: pointer; text-decoration: none; }
.primary { background: #b8922a; color: #fff; border-color: #b8922a; }
.danger { color: #f08080; }
.armed { background: #5a1f1f; }
.actions form, .inline { display: inline; }
.modal-backdrop { position: fixed; inset: 0; background: rgba(0,0,0,0.7); display: flex; align-items: center; justify-content: center; }
.modal { background: #1b2027; padding: 1.5rem; border-radius: 10px; width: 420px; max-height: 90vh; overflow-y: auto; }
.modal label { display: block; margin-bottom: 0.8rem; color: #d4af37; }
.modal input, .modal select, .modal textarea { display: block; width: 100%; margin-top: 0.3rem; }
.required { color: #f08080; }
.empty, .muted { color: #8a919c; }
.stars { color: #d4af37; }
"#;

const NAV: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/products", "Products"),
    ("/recommendations", "Reviews"),
    ("/cart", "Cart"),
    ("/profile", "Profile"),
    ("/register", "Sign Up"),
    ("/admin", "Admin"),
];

pub fn page(title: &str, body: &str) -> HttpResponse {
    let mut nav = String::new();
    for (href, label) in NAV {
        nav.push_str(&format!("<a href=\"{}\">{}</a>", href, label));
    }

    let html = format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{} | Storefront</title><style>{}</style></head>\n<body>\n<header><strong>Storefront</strong>{}</header>\n<main>\n{}</main>\n</body>\n</html>\n",
        escape(title),
        STYLE,
        nav,
        body
    );

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Redirect after a form POST so a reload does not resubmit.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Five-star bar, e.g. `★★★☆☆` for 3.
pub fn stars(rating: i64) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn test_see_other() {
        let response = see_other("/admin/products");
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/admin/products"
        );
    }
}

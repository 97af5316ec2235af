//! Inline HTML views for the login page and the scene list.

use axum::response::Html;

use crate::types::{Scene, SessionContext};

/// Escape text for HTML text and attribute positions.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Landing page for unauthenticated visitors: a link to the platform's
/// authorization page, plus the error from a failed login attempt if one
/// was carried back in the query string.
pub(super) fn login_page(authorization_url: &str, error: Option<&str>) -> Html<String> {
    let error_block = match error {
        Some(message) => format!("<p class=\"error\">{}</p>\n    ", escape(message)),
        None => String::new(),
    };
    Html(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>SmartThings Scenes</title></head>\n\
         <body>\n\
           <h1>SmartThings Scenes</h1>\n\
           {error_block}<p><a href=\"{url}\">Connect to SmartThings</a></p>\n\
         </body>\n\
         </html>\n",
        url = escape(authorization_url),
    ))
}

/// Scene list for an authenticated session.
///
/// Renders even when the scene list could not be fetched: the error text is
/// shown and the list is empty.
pub(super) fn scenes_page(
    context: &SessionContext,
    error_message: &str,
    scenes: &[Scene],
) -> Html<String> {
    let error_block = if error_message.is_empty() {
        String::new()
    } else {
        format!("<p class=\"error\">{}</p>\n  ", escape(error_message))
    };

    let items: String = scenes
        .iter()
        .map(|scene| {
            format!(
                "    <li>{name}\n      \
                 <form method=\"post\" action=\"/scenes/{id}\"><button type=\"submit\">Run</button></form>\n    \
                 </li>\n",
                name = escape(&scene.scene_name),
                id = urlencoding::encode(&scene.scene_id.0),
            )
        })
        .collect();

    Html(format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><title>Scenes</title></head>\n\
         <body>\n\
           <h1>Scenes in {location}</h1>\n  \
           {error_block}<ul>\n\
         {items}  </ul>\n  \
           <p><a href=\"/logout\">Disconnect</a></p>\n  \
           <footer>Installed app: {app_id}</footer>\n\
         </body>\n\
         </html>\n",
        location = escape(&context.location_name),
        app_id = escape(&context.installed_app_id.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InstalledAppId, LocationId, SceneId};

    fn test_context() -> SessionContext {
        SessionContext {
            installed_app_id: InstalledAppId::from("A1".to_string()),
            auth_token: "T1".into(),
            refresh_token: "R1".into(),
            location_id: LocationId::from("L1".to_string()),
            location_name: "Home".into(),
        }
    }

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn login_page_links_the_authorization_url() {
        let Html(body) = login_page("https://auth.example/authorize?client_id=c&scope=s", None);
        assert!(body.contains("href=\"https://auth.example/authorize?client_id=c&amp;scope=s\""));
        assert!(!body.contains("class=\"error\""));
    }

    #[test]
    fn login_page_shows_an_error_when_present() {
        let Html(body) = login_page("https://auth.example/authorize", Some("token_exchange_failed"));
        assert!(body.contains("token_exchange_failed"));
        assert!(body.contains("class=\"error\""));
    }

    #[test]
    fn scenes_page_renders_scenes_and_identity() {
        let scenes = vec![Scene {
            scene_id: SceneId::from("S1".to_string()),
            scene_name: "Morning".into(),
        }];
        let Html(body) = scenes_page(&test_context(), "", &scenes);
        assert!(body.contains("Morning"));
        assert!(body.contains("action=\"/scenes/S1\""));
        assert!(body.contains("Scenes in Home"));
        assert!(body.contains("Installed app: A1"));
        assert!(!body.contains("class=\"error\""));
    }

    #[test]
    fn scenes_page_renders_error_with_empty_list() {
        let Html(body) = scenes_page(&test_context(), "rate limited", &[]);
        assert!(body.contains("rate limited"));
        assert!(!body.contains("<li>"));
    }

    #[test]
    fn scene_names_are_escaped() {
        let scenes = vec![Scene {
            scene_id: SceneId::from("S1".to_string()),
            scene_name: "<script>alert(1)</script>".into(),
        }];
        let Html(body) = scenes_page(&test_context(), "", &scenes);
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
    }
}

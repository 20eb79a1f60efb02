use crate::errors::{AppError, AppResult};
use crate::models::Session;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

pub fn load_template(name: &str) -> AppResult<String> {
    std::fs::read_to_string(format!("templates/{}", name)).map_err(|e| {
        tracing::error!("Failed to read template {}: {}", name, e);
        AppError::File(e)
    })
}

/// Fills every `{{name}}` placeholder in one pass, so substituted text is
/// never scanned again. Unknown placeholders are left as they are.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// `path?k=v&...` with every value percent-encoded.
pub fn href(path: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", path, query)
}

pub fn status_banner(stat: Option<&str>) -> String {
    match stat {
        Some("succeed") => r#"<div class="banner success">succeed</div>"#.to_string(),
        Some("failed") => r#"<div class="banner error">failed</div>"#.to_string(),
        _ => String::new(),
    }
}

pub fn message_banner(message: Option<&str>) -> String {
    match message.filter(|m| !m.is_empty()) {
        Some(m) => format!(r#"<div class="banner info">{}</div>"#, escape_html(m)),
        None => String::new(),
    }
}

// Member and billing management only show up for admins.
fn render_nav(session: &Session) -> String {
    let mut links = vec![("/dashboard", "Dashboard"), ("/dashboard/tasks", "Tasks")];
    if session.is_admin() {
        links.push(("/dashboard/member", "Members"));
        links.push(("/dashboard/billing", "Billing"));
    }
    links
        .iter()
        .map(|(path, label)| format!(r#"<li><a href="{}">{}</a></li>"#, path, label))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_dashboard(
    title: &str,
    session: &Session,
    banner: &str,
    content: &str,
) -> AppResult<String> {
    let layout = load_template("dashboard.html")?;
    let role = session.role().map(|r| r.as_str()).unwrap_or("none");

    let title = escape_html(title);
    let user_name = escape_html(session.display_name());
    let nav = render_nav(session);

    Ok(fill_template(
        &layout,
        &[
            ("title", title.as_str()),
            ("user_name", user_name.as_str()),
            ("role", role),
            ("nav", nav.as_str()),
            ("banner", banner),
            ("content", content),
        ],
    ))
}

//! Export the descriptor in the shape the site generator reads.

use serde_json::{json, Map, Value};

use crate::descriptor::{Link, SiteConfig};

/// Render the descriptor as generator configuration JSON.
///
/// Keys follow the generator's theme config: links become `{text, link}`,
/// sidebar groups `{text, items}` and social links `{icon, link}`.
pub fn generator_config(site: &SiteConfig) -> Value {
    let mut theme = Map::new();

    if let Some(logo) = &site.logo {
        theme.insert("logo".to_string(), json!(logo.as_str()));
    }

    theme.insert("nav".to_string(), links(&site.nav));

    let sidebar: Map<String, Value> = site
        .sidebar
        .iter()
        .map(|(section, groups)| {
            let groups: Vec<Value> = groups
                .iter()
                .map(|group| {
                    json!({
                        "text": group.title,
                        "items": links(&group.items),
                    })
                })
                .collect();
            (section.to_string(), Value::Array(groups))
        })
        .collect();
    theme.insert("sidebar".to_string(), Value::Object(sidebar));

    let social: Vec<Value> = site
        .social_links
        .iter()
        .map(|s| json!({ "icon": s.platform.icon(), "link": s.target.as_str() }))
        .collect();
    theme.insert("socialLinks".to_string(), Value::Array(social));

    json!({
        "title": site.title,
        "description": site.description,
        "themeConfig": theme,
    })
}

fn links(links: &[Link]) -> Value {
    links
        .iter()
        .map(|l| json!({ "text": l.label, "link": l.target.as_str() }))
        .collect()
}

//! Built-in descriptor for the Pears documentation site.

use crate::descriptor::SiteConfig;

const PEARS_SITE: &str = r#"
title = "Pears"
description = "A lightweight, fast, and reliable package manager and system configuration tool"
logo = "/logo.png"

nav = [
    { label = "Home", target = "/" },
    { label = "Guide", target = "/guide/" },
    { label = "Reference", target = "/reference/" },
    { label = "GitHub", target = "https://github.com/dunnoconz/pears" },
]

social_links = [
    { platform = "github", target = "https://github.com/dunnoconz/pears" },
]

[[sidebar."/guide/"]]
title = "Getting Started"
items = [
    { label = "Introduction", target = "/guide/" },
    { label = "Installation", target = "/guide/installation" },
    { label = "Configuration", target = "/guide/configuration" },
]

[[sidebar."/guide/"]]
title = "Usage"
items = [
    { label = "Basic Commands", target = "/guide/basic-commands" },
    { label = "Advanced Usage", target = "/guide/advanced-usage" },
]

[[sidebar."/reference/"]]
title = "API Reference"
items = [
    { label = "Configuration", target = "/reference/configuration" },
    { label = "Commands", target = "/reference/commands" },
]
"#;

/// The Pears documentation descriptor.
pub fn pears() -> SiteConfig {
    SiteConfig::from_toml_str(PEARS_SITE).expect("built-in site descriptor is valid")
}

//! Site descriptor for the Pears documentation.
//!
//! Declares the site's identity, navigation and sidebar structure as a typed,
//! validated record that can be exported for the static site generator.

pub mod defaults;
pub mod descriptor;
pub mod export;
pub mod target;

pub use descriptor::{
    Link, PlatformError, SidebarGroup, SiteConfig, SiteError, SocialLink, SocialPlatform,
};
pub use export::generator_config;
pub use target::{LinkTarget, SectionPath, TargetError};

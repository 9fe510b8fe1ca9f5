pub mod auth;
pub mod content;
pub mod media;
pub mod page;
pub mod seo;
pub mod site;

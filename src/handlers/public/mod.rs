use serde::Deserialize;

pub mod auth;
pub mod experts;
pub mod home;
pub mod nonprofits;
pub mod users;

/// Pagination query parameters shared by the paged list endpoints.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page_number")]
    pub page_number: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_number() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

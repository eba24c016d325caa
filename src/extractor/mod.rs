pub mod links;
pub mod model;
pub mod ptt;
pub mod source;
pub mod text;

#[cfg(test)]
mod tests;

pub use links::find_first_url;
pub use ptt::{ExtractError, PostText, extract_post, extract_post_text, find_title_line};
pub use source::extract_readable_text;

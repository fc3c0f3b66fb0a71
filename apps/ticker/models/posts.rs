use serde::{Deserialize, Serialize};

/// A topic post as returned by `/t/{id}/posts.json?include_raw=true`.
///
/// `created_at` stays a string: it is only ever compared lexically.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Post {
    pub post_number: u64,
    pub raw: String,
    pub created_at: String,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PostResponse {
    pub post_stream: PostStream,
}

#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PostStream {
    pub posts: Vec<Post>,
}

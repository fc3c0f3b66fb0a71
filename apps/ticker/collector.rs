use crate::{
    config::{TickerConfig, TopicId},
    discourse_api::Forum,
    error::Result,
    headline::{HeadlineItem, extract_headline},
    models::posts::Post,
    selection::Candidate,
    state::Checkpoints,
};
use tracing::{debug, info, instrument};

/// Headlines gathered in one run. Neither list outlives the run.
#[derive(Debug, Default)]
pub struct Collected {
    /// Every headline still present on the configured topics.
    pub all: Vec<Candidate>,
    /// Headlines from posts past the topic's previous checkpoint.
    pub new: Vec<Candidate>,
}

/// Fetches every configured topic in order and advances `checkpoints`.
///
/// The first failed fetch aborts the whole collection. `checkpoints` may
/// already be partly advanced at that point, so callers must not persist it.
pub async fn collect_candidates<F>(
    forum: &F,
    config: &TickerConfig,
    checkpoints: &mut Checkpoints,
) -> Result<Collected>
where
    F: Forum + ?Sized,
{
    let mut collected = Collected::default();
    for topic in &config.topics {
        let posts = forum.fetch_posts(topic).await?;
        collect_topic(&config.base_url, topic, &posts, checkpoints, &mut collected);
    }

    info!(
        all = collected.all.len(),
        new = collected.new.len(),
        "Collected headline candidates"
    );
    Ok(collected)
}

#[instrument(skip_all, fields(topic = %topic, posts = posts.len()))]
fn collect_topic(
    base_url: &str,
    topic: &TopicId,
    posts: &[Post],
    checkpoints: &mut Checkpoints,
    collected: &mut Collected,
) {
    let seen = checkpoints.get(topic);

    // Post #1 opens the topic and is never a headline.
    for post in posts.iter().filter(|p| p.post_number != 1) {
        let Some(title) = extract_headline(&post.raw) else {
            continue;
        };

        let candidate = Candidate::timestamped(
            post.created_at.clone(),
            HeadlineItem::new(base_url, topic, post.post_number, title),
        );
        if post.post_number > seen {
            debug!(post_number = post.post_number, title, "New headline");
            collected.new.push(candidate.clone());
        }
        collected.all.push(candidate);
    }

    // Posts without a headline still count as seen.
    if let Some(max) = posts.iter().map(|p| p.post_number).max() {
        checkpoints.advance(topic, max);
    }
}

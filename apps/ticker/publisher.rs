use crate::{discourse_api::Forum, error::Result, headline::HeadlineItem};
use tracing::info;

/// Theme component setting that feeds the marquee.
pub const MARQUEE_SETTING: &str = "marquee_list";
/// The display splits the setting on this; items are not escaped.
pub const MARQUEE_SEPARATOR: &str = "|";

pub fn render_marquee(items: &[HeadlineItem]) -> String {
    items
        .iter()
        .map(HeadlineItem::as_str)
        .collect::<Vec<_>>()
        .join(MARQUEE_SEPARATOR)
}

/// Overwrites the marquee setting with `items`, unconditionally.
///
/// Returns the number of items published.
pub async fn publish_marquee<F>(
    forum: &F,
    component_id: &str,
    items: &[HeadlineItem],
) -> Result<usize>
where
    F: Forum + ?Sized,
{
    let value = render_marquee(items);
    forum
        .update_theme_setting(component_id, MARQUEE_SETTING, &value)
        .await?;

    info!(items = items.len(), "Ticker updated");
    Ok(items.len())
}

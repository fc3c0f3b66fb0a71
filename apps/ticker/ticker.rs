use crate::{
    collector::collect_candidates,
    config::{TickerConfig, TickerPaths},
    discourse_api::{DiscourseApi, Forum},
    error::Result,
    publisher::publish_marquee,
    selection::select_marquee,
    state::{StateStore, TickerState},
};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub new_headlines: usize,
    pub published: usize,
}

/// Collects headlines, publishes the marquee and records it in `state`.
///
/// `state` is only meaningful once this returns `Ok`; on error the caller must
/// discard it rather than persist it.
pub async fn refresh<F>(
    forum: &F,
    config: &TickerConfig,
    state: &mut TickerState,
) -> Result<RunSummary>
where
    F: Forum + ?Sized,
{
    let collected = collect_candidates(forum, config, &mut state.last_seen).await?;
    let new_headlines = collected.new.len();

    let marquee = select_marquee(collected.new, collected.all, &state.marquee);
    let published = publish_marquee(forum, &config.component_id, &marquee).await?;
    state.marquee = marquee;

    Ok(RunSummary {
        new_headlines,
        published,
    })
}

/// One full invocation: load config and state, refresh, save state.
///
/// The config is read first so a missing file fails before any network call
/// or state access. State is written once, and only if every call succeeded.
#[instrument(skip_all, fields(config = %paths.config.display()))]
pub async fn run(paths: &TickerPaths) -> Result<RunSummary> {
    let config = TickerConfig::load(&paths.config)?;
    let api = DiscourseApi::new(&config)?;
    run_with(&api, &config, &StateStore::new(&paths.state)).await
}

pub async fn run_with<F>(
    forum: &F,
    config: &TickerConfig,
    store: &StateStore,
) -> Result<RunSummary>
where
    F: Forum + ?Sized,
{
    let mut state = store.load()?;
    let summary = refresh(forum, config, &mut state).await?;
    store.save(&state)?;

    info!(
        new_headlines = summary.new_headlines,
        published = summary.published,
        "Run complete"
    );
    Ok(summary)
}

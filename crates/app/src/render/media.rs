//! Media section: streams, today's episodes, movie queue, downloader and
//! request backlog.

use askama::Template;

use labdash_domain::format::episode_code;
use labdash_domain::snapshot::{Episode, Media, QueueItem, Sabnzbd, Snapshot, Stream};

use super::view::EmptyState;

#[derive(Template)]
#[template(path = "sections/media.html")]
struct MediaTemplate<'a> {
    streams: &'a [Stream],
    today_count: u64,
    episodes: Vec<EpisodeRow<'a>>,
    queue_count: u64,
    queue: &'a [QueueItem],
    downloader: Option<&'a Sabnzbd>,
    pending_requests: u64,
}

struct EpisodeRow<'a> {
    episode: &'a Episode,
    code: String,
}

impl<'a> MediaTemplate<'a> {
    fn new(media: &'a Media) -> Self {
        // The stream list is only trusted while the player reports activity.
        let streams = media
            .tautulli
            .as_ref()
            .filter(|tautulli| tautulli.active_streams.unwrap_or_default() > 0)
            .map(|tautulli| tautulli.streams.as_slice())
            .unwrap_or_default();
        let sonarr = media.sonarr.as_ref();
        let radarr = media.radarr.as_ref();

        Self {
            streams,
            today_count: sonarr
                .and_then(|sonarr| sonarr.today_count)
                .unwrap_or_default(),
            episodes: sonarr
                .map(|sonarr| sonarr.episodes.as_slice())
                .unwrap_or_default()
                .iter()
                .map(|episode| EpisodeRow {
                    episode,
                    code: episode_code(
                        episode.season.unwrap_or_default(),
                        episode.episode.unwrap_or_default(),
                    ),
                })
                .collect(),
            queue_count: radarr
                .and_then(|radarr| radarr.queue_count)
                .unwrap_or_default(),
            queue: radarr
                .map(|radarr| radarr.queue.as_slice())
                .unwrap_or_default(),
            downloader: media.sabnzbd.as_ref(),
            pending_requests: media
                .overseerr
                .as_ref()
                .and_then(|overseerr| overseerr.pending_requests)
                .unwrap_or_default(),
        }
    }
}

pub(super) fn render(snapshot: &Snapshot) -> askama::Result<String> {
    match &snapshot.media {
        Some(media) => MediaTemplate::new(media).render(),
        None => EmptyState::new("No media data").render(),
    }
}

//! Session: one board editing context.
//!
//! Owns the board, the selection, the notice queue, and the pending share
//! fallback, so independent sessions (and tests) never share state through
//! module globals. All mutations happen through discrete calls on the
//! session; the only multi-step flows are composition (request out, result
//! back in) and the delayed share fallback, both modeled as explicit state.

use crate::board::{Board, ContextOutcome, RowId};
use crate::compose::{ComposeInput, CompositionRequest, Orientation};
use crate::config::{Preset, Settings};
use crate::error::{ManifestError, TierError};
use crate::manifest;
use crate::notice::NoticeCenter;
use crate::reorder::{self, DropSpot};
use crate::selection::{SelectionTracker, Toggle};
use crate::share::{share_url, PendingShare};
use crate::tile::{ImageSource, TileId};
use std::time::Instant;
use url::Url;

/// A finished export, ready for the shell to write to disk.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub png: Vec<u8>,
}

/// What the share flow decided to do.
#[derive(Debug, Clone)]
pub enum ShareOutcome {
    /// Capture succeeded; open the intent now.
    Opened(Url),
    /// Capture failed; the intent opens once the fallback is due.
    Deferred { due: Instant },
}

/// One board editing context.
#[derive(Debug)]
pub struct Session {
    /// The board document.
    pub board: Board,
    selection: SelectionTracker,
    notices: NoticeCenter,
    preset: &'static Preset,
    settings: Settings,
    pending_share: Option<PendingShare>,
}

impl Session {
    /// Create a session for a preset with default settings.
    pub fn new(preset: &'static Preset) -> Self {
        Self::with_settings(preset, Settings::default())
    }

    /// Create a session with explicit settings.
    pub fn with_settings(preset: &'static Preset, settings: Settings) -> Self {
        Self {
            board: Board::new(),
            selection: SelectionTracker::new(),
            notices: NoticeCenter::new(settings.notice_duration, settings.notice_fade),
            preset,
            settings,
            pending_share: None,
        }
    }

    /// The active preset.
    pub fn preset(&self) -> &'static Preset {
        self.preset
    }

    /// The session settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The notice queue.
    pub fn notices(&self) -> &NoticeCenter {
        &self.notices
    }

    /// Current selection size.
    pub fn selection_count(&self) -> usize {
        self.selection.count()
    }

    /// Whether a tile carries the selection marker.
    pub fn is_selected(&self, id: TileId) -> bool {
        self.selection.is_selected(id)
    }

    // ---- startup ----------------------------------------------------------

    /// Populate the board from a fetched manifest.
    ///
    /// Fetch and parse failures are recovered locally: the board stays
    /// empty and a notice is posted. Returns the number of tiles loaded.
    pub fn load_manifest(&mut self, fetched: Result<String, ManifestError>, now: Instant) -> usize {
        let entries = match fetched.and_then(|text| manifest::parse(&text)) {
            Ok(entries) => entries,
            Err(err) => {
                self.notices.post(TierError::ManifestLoad(err).to_string(), now);
                return 0;
            }
        };
        let count = entries.len();
        for entry in entries {
            let tile = self
                .board
                .mint_tile(ImageSource::from_uri(entry.source), entry.label)
                .initial();
            self.board.insert_at_tail(RowId::Pool, tile);
        }
        log::info!("loaded {count} initial tiles from {}", self.preset.manifest_path);
        count
    }

    // ---- intake -----------------------------------------------------------

    /// Add an uploaded or pasted image at the pool head as a removable tile.
    pub fn add_image(&mut self, source: ImageSource) -> TileId {
        let tile = self.board.mint_tile(source, "");
        let id = tile.id();
        self.board.insert_at_head(RowId::Pool, tile);
        id
    }

    // ---- selection --------------------------------------------------------

    /// Toggle a tile's selection, keeping the visual marker in sync.
    ///
    /// Selecting snapshots the tile's current label. A full selection posts
    /// a notice and changes nothing. Unknown ids are ignored.
    pub fn toggle_selection(&mut self, id: TileId, now: Instant) -> Option<Toggle> {
        let label = self.board.tile(id)?.label.clone();
        match self.selection.toggle(id, &label) {
            Ok(toggle) => {
                if let Some(tile) = self.board.tile_mut(id) {
                    tile.selected = toggle == Toggle::Selected;
                }
                Some(toggle)
            }
            Err(err) => {
                self.notices.post(err.to_string(), now);
                None
            }
        }
    }

    /// Unconditionally clear the selection and every marker.
    pub fn clear_selection(&mut self) {
        let ids: Vec<TileId> = self.selection.picks().map(|pick| pick.id).collect();
        for id in ids {
            if let Some(tile) = self.board.tile_mut(id) {
                tile.selected = false;
            }
        }
        self.selection.clear();
    }

    // ---- composition ------------------------------------------------------

    /// Start composing the two selected tiles.
    ///
    /// Fails with a notice unless exactly two tiles are selected. The
    /// selection survives until the result comes back; only the pending
    /// composition waits on image decode.
    pub fn begin_composition(
        &mut self,
        orientation: Orientation,
        now: Instant,
    ) -> Option<CompositionRequest> {
        let Some((first, second)) = self.selection.pair() else {
            self.notices
                .post(TierError::InsufficientSelection.to_string(), now);
            return None;
        };
        let (first, second) = (first.clone(), second.clone());
        let first_source = self.board.tile(first.id).map(|tile| tile.source.clone());
        let second_source = self.board.tile(second.id).map(|tile| tile.source.clone());
        match (first_source, second_source) {
            (Some(first_source), Some(second_source)) => Some(CompositionRequest {
                orientation,
                first: ComposeInput {
                    source: first_source,
                    label: first.label,
                },
                second: ComposeInput {
                    source: second_source,
                    label: second.label,
                },
            }),
            _ => {
                self.notices
                    .post(TierError::InsufficientSelection.to_string(), now);
                None
            }
        }
    }

    /// Accept the result of a composition.
    ///
    /// On success the composed image becomes a removable tile at the pool
    /// head; on failure a notice is posted. Either way the selection is
    /// cleared.
    pub fn finish_composition(
        &mut self,
        request: &CompositionRequest,
        result: Result<ImageSource, TierError>,
        now: Instant,
    ) -> Option<TileId> {
        let outcome = match result {
            Ok(source) => {
                let tile = self.board.mint_tile(source, request.joined_label());
                let id = tile.id();
                self.board.insert_at_head(RowId::Pool, tile);
                Some(id)
            }
            Err(err) => {
                log::error!("composition failed: {err}");
                self.notices.post(err.to_string(), now);
                None
            }
        };
        self.clear_selection();
        outcome
    }

    // ---- board edits ------------------------------------------------------

    /// Move a dragged tile (pointer or touch path both end up here).
    pub fn reorder(&mut self, dragged: TileId, spot: DropSpot, target: RowId) -> bool {
        reorder::reorder(&mut self.board, dragged, spot, target)
    }

    /// Remove a tile, keeping the selection consistent.
    pub fn remove_tile(&mut self, id: TileId) -> bool {
        if self.board.remove(id).is_some() {
            self.selection.discard(id);
            true
        } else {
            false
        }
    }

    /// Right-click / long-press action on a tile.
    pub fn context_action(&mut self, id: TileId) -> ContextOutcome {
        let outcome = self.board.context_action(id);
        if outcome == ContextOutcome::Removed {
            self.selection.discard(id);
        }
        outcome
    }

    // ---- export and share -------------------------------------------------

    /// Accept a board capture for download.
    ///
    /// A failed capture becomes a notice; a successful one is returned with
    /// the configured filename for the shell to write.
    pub fn export(
        &mut self,
        capture: Result<Vec<u8>, TierError>,
        now: Instant,
    ) -> Option<ExportFile> {
        match capture {
            Ok(png) => Some(ExportFile {
                filename: self.settings.download_filename.clone(),
                png,
            }),
            Err(err) => {
                log::error!("export failed: {err}");
                self.notices.post(err.to_string(), now);
                None
            }
        }
    }

    /// Run the share flow against a capture attempt.
    ///
    /// The capture is only a health check: the image is never attached.
    /// On capture failure the share intent still opens, after the
    /// configured fallback delay.
    pub fn share(&mut self, capture: Result<(), TierError>, now: Instant) -> Option<ShareOutcome> {
        let url = match share_url(&self.settings.share_intent_url, self.preset.share_text) {
            Ok(url) => url,
            Err(err) => {
                log::error!("bad share intent URL: {err}");
                return None;
            }
        };
        match capture {
            Ok(()) => Some(ShareOutcome::Opened(url)),
            Err(err) => {
                self.notices.post(
                    format!("{err}; sharing without the capture shortly"),
                    now,
                );
                let due = now + self.settings.share_fallback_delay;
                self.pending_share = Some(PendingShare { url, due });
                Some(ShareOutcome::Deferred { due })
            }
        }
    }

    /// Advance timed state: sweep notices and release a due share fallback.
    pub fn poll(&mut self, now: Instant) -> Option<Url> {
        self.notices.sweep(now);
        if self.pending_share.as_ref().is_some_and(|p| p.is_due(now)) {
            return self.pending_share.take().map(|p| p.url);
        }
        None
    }
}

use slotmap::SlotMap;

use crate::error::SceneError;
use crate::geometry::CatmullRomCurve;

slotmap::new_key_type! {
    /// Unique identifier for a track curve in the [`TrackStore`].
    pub struct TrackId;
}

/// Arena that owns the track curves.
///
/// Bodies refer to their track by [`TrackId`] (a generational index), so a
/// track can be replaced without leaving a body with a dangling reference:
/// lookups through a stale id fail instead.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: SlotMap<TrackId, CatmullRomCurve>,
}

impl TrackStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a track and returns its ID.
    pub fn add_track(&mut self, curve: CatmullRomCurve) -> TrackId {
        self.tracks.insert(curve)
    }

    /// Removes a track, returning it if it was present.
    pub fn remove_track(&mut self, id: TrackId) -> Option<CatmullRomCurve> {
        self.tracks.remove(id)
    }

    /// Returns a reference to the track, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the track is not in the store.
    pub fn track(&self, id: TrackId) -> Result<&CatmullRomCurve, SceneError> {
        self.tracks.get(id).ok_or(SceneError::TrackNotFound)
    }

    /// Returns a mutable reference to the track, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the track is not in the store.
    pub fn track_mut(&mut self, id: TrackId) -> Result<&mut CatmullRomCurve, SceneError> {
        self.tracks.get_mut(id).ok_or(SceneError::TrackNotFound)
    }

    /// Returns the number of tracks in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns whether the store holds no tracks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

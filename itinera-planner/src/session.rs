//! The planning session: bridges the external mapping capability to the
//! itinerary list state.
//!
//! # Lifecycle
//!
//! [`PlannerSession::mount`] attempts canvas acquisition exactly once. A
//! failed acquisition leaves the session detached: every operation becomes
//! a logged no-op, mirroring a host surface that never appeared.
//! [`PlannerSession::close`] (also run on `Drop`) releases every place's
//! visuals and then the canvas itself, so repeated mount/unmount cycles
//! leak nothing.
//!
//! # Anomaly policy
//!
//! Nothing in the interaction path panics or propagates errors. Unknown
//! ids, cancelled drags, unresolvable candidates, and out-of-range
//! reorders all degrade to no-ops, logged through the `log` facade for
//! observability.

use geo::Rect;
use itinera_core::{Itinerary, MapCanvas, MapProvider, Place, PlaceCandidate, PlaceId};
use log::{debug, warn};

use crate::config::PlannerConfig;
use crate::drag::{DragOutcome, Interaction};
use crate::event::PlannerEvent;
use crate::ids::PlaceIdAllocator;

/// Interactive search-and-itinerary session over a mapping capability.
///
/// The session owns the itinerary and the canvas handles of every listed
/// place. Mutations happen only through the event operations below, each
/// atomic with respect to the single-threaded event queue.
pub struct PlannerSession<P: MapProvider> {
    canvas: Option<P::Canvas>,
    itinerary: Itinerary,
    ids: PlaceIdAllocator,
    config: PlannerConfig,
    interaction: Interaction,
}

impl<P: MapProvider> PlannerSession<P> {
    /// Mount the session, attempting canvas acquisition exactly once.
    ///
    /// Acquisition failure is logged, not surfaced: the session stays
    /// usable but inert, so a missing host surface cannot crash the
    /// interaction.
    pub fn mount(provider: &mut P, config: PlannerConfig) -> Self {
        let canvas = match provider.acquire(&config.initial_viewport) {
            Ok(canvas) => Some(canvas),
            Err(err) => {
                warn!("map capability unavailable, session is inert: {err}");
                None
            }
        };
        Self {
            canvas,
            itinerary: Itinerary::new(),
            ids: PlaceIdAllocator::new(),
            config,
            interaction: Interaction::Idle,
        }
    }

    /// Whether a canvas was acquired at mount and not yet released.
    pub fn is_attached(&self) -> bool {
        self.canvas.is_some()
    }

    /// Current places in visit order. Read-only render surface.
    pub fn places(&self) -> &[Place] {
        self.itinerary.places()
    }

    /// The underlying itinerary state.
    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// Current interaction state of the list.
    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// The acquired canvas, for render-layer bindings.
    pub fn canvas(&self) -> Option<&P::Canvas> {
        self.canvas.as_ref()
    }

    /// The configuration the session was mounted with.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Dispatch one external event.
    ///
    /// This is the single mutation entry point; every callback from the
    /// search box, the list controls, and the drag capability funnels
    /// through here.
    pub fn handle(&mut self, event: PlannerEvent) {
        match event {
            PlannerEvent::PlacesSelected(candidates) => self.places_selected(candidates),
            PlannerEvent::RemovePlace(id) => self.remove_place(id),
            PlannerEvent::ClearAll => self.clear_all(),
            PlannerEvent::ViewportChanged(bounds) => self.viewport_changed(bounds),
            PlannerEvent::DragStarted { index } => self.drag_started(index),
            PlannerEvent::DragEnded(outcome) => self.drag_ended(outcome),
        }
    }

    /// Process a committed search: one place per resolvable candidate.
    ///
    /// Candidates without a location are skipped. Each accepted candidate
    /// gets its marker and popup before the place is listed, so the list
    /// never shows an entry without live visuals. After the batch the map
    /// focuses the most recently added location and the search input is
    /// cleared; an empty batch changes nothing at all.
    pub fn places_selected(&mut self, candidates: Vec<PlaceCandidate>) {
        if candidates.is_empty() {
            return;
        }
        let Some(canvas) = self.canvas.as_mut() else {
            debug!(
                "selection of {} candidate(s) arrived before canvas acquisition; ignored",
                candidates.len()
            );
            return;
        };
        let mut focus = None;
        for candidate in candidates {
            let Some(location) = candidate.location else {
                debug!("candidate {:?} has no resolvable location; skipped", candidate.name);
                continue;
            };
            let marker = canvas.place_marker(location, &self.config.marker_style);
            let popup =
                canvas.attach_popup(marker, &popup_content(&candidate.name, &candidate.address));
            let place = Place::new(
                self.ids.next_id(),
                candidate.name,
                candidate.address,
                marker,
                popup,
            );
            match self.itinerary.append(place) {
                Ok(()) => focus = Some(location),
                Err(err) => {
                    // Unreachable while ids come from the monotonic
                    // allocator; release the visuals if it ever fires.
                    warn!("{err}");
                    let rejected = err.0;
                    canvas.close_popup(rejected.popup);
                    canvas.remove_marker(rejected.marker);
                }
            }
        }
        if let Some(location) = focus {
            canvas.pan_to(location);
            canvas.set_zoom(self.config.focus_zoom);
        }
        canvas.clear_search_input();
    }

    /// Remove one place, releasing its marker and popup.
    ///
    /// Unknown ids are ignored, so removal is idempotent.
    pub fn remove_place(&mut self, id: PlaceId) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        let Some(place) = self.itinerary.get(id) else {
            debug!("remove for unknown place id {id}; ignored");
            return;
        };
        let (marker, popup) = (place.marker, place.popup);
        canvas.remove_marker(marker);
        canvas.close_popup(popup);
        self.itinerary.remove(id);
    }

    /// Remove every place, releasing all markers and popups.
    ///
    /// Calling this on an empty itinerary is a no-op, so repeated clears
    /// converge on the same empty state.
    pub fn clear_all(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            for place in self.itinerary.places() {
                canvas.remove_marker(place.marker);
                canvas.close_popup(place.popup);
            }
        }
        self.itinerary.clear();
    }

    /// Bias search results towards the newly visible map area.
    pub fn viewport_changed(&mut self, bounds: Rect<f64>) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.set_search_bounds(bounds);
        }
    }

    /// Note that a drag gesture picked up the entry at `index`.
    ///
    /// The itinerary itself is untouched until the gesture resolves.
    pub fn drag_started(&mut self, index: usize) {
        if index >= self.itinerary.len() {
            warn!(
                "drag start at index {index} outside itinerary of length {}; ignored",
                self.itinerary.len()
            );
            return;
        }
        self.interaction = Interaction::Dragging { index };
    }

    /// Resolve a drag gesture, applying the reorder when it landed.
    ///
    /// A cancelled gesture (`destination` of `None`) leaves the order
    /// untouched. Out-of-range indices are rejected by the itinerary and
    /// logged here.
    pub fn drag_ended(&mut self, outcome: DragOutcome) {
        self.interaction = Interaction::Idle;
        let Some(destination) = outcome.destination else {
            return;
        };
        if let Err(err) = self.itinerary.move_place(outcome.source, destination) {
            warn!("reorder rejected: {err}");
        }
    }

    /// Release every place's visuals and the canvas itself.
    ///
    /// Returns the released canvas so embedders can verify teardown.
    /// Subsequent calls (and `Drop`) are no-ops.
    pub fn close(&mut self) -> Option<P::Canvas> {
        let mut canvas = self.canvas.take()?;
        for place in self.itinerary.places() {
            canvas.remove_marker(place.marker);
            canvas.close_popup(place.popup);
        }
        self.itinerary.clear();
        canvas.release();
        Some(canvas)
    }
}

impl<P: MapProvider> Drop for PlannerSession<P> {
    fn drop(&mut self) {
        drop(self.close());
    }
}

/// Popup body shown when the place's marker is activated.
///
/// Plain text; markup is the canvas implementation's business.
fn popup_content(name: &str, address: &str) -> String {
    if address.is_empty() {
        name.to_owned()
    } else {
        format!("{name}\n{address}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, Rect};
    use itinera_core::test_support::{MissingTargetProvider, RecordingProvider};
    use rstest::{fixture, rstest};

    fn candidate(name: &str, x: f64) -> PlaceCandidate {
        PlaceCandidate::located(name, format!("{name} street"), Coord { x, y: 0.0 })
    }

    #[fixture]
    fn session() -> PlannerSession<RecordingProvider> {
        let mut provider = RecordingProvider::default();
        PlannerSession::mount(&mut provider, PlannerConfig::default())
    }

    /// Session preloaded with places A, B, C.
    #[fixture]
    fn abc_session() -> PlannerSession<RecordingProvider> {
        let mut planning = session();
        planning.places_selected(vec![
            candidate("A", 1.0),
            candidate("B", 2.0),
            candidate("C", 3.0),
        ]);
        planning
    }

    fn names(planning: &PlannerSession<RecordingProvider>) -> Vec<&str> {
        planning.places().iter().map(|p| p.name.as_str()).collect()
    }

    #[rstest]
    fn mount_acquires_canvas_with_initial_viewport(session: PlannerSession<RecordingProvider>) {
        assert!(session.is_attached());
        let canvas = session.canvas().expect("attached");
        assert_eq!(canvas.center(), Some(session.config().initial_viewport.center));
        assert_eq!(canvas.zoom(), Some(12));
    }

    #[rstest]
    fn selection_appends_places_in_order_with_distinct_ids(
        abc_session: PlannerSession<RecordingProvider>,
    ) {
        assert_eq!(names(&abc_session), ["A", "B", "C"]);
        let ids: Vec<_> = abc_session.itinerary().ids().collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|pair| pair[0] != pair[1]));
    }

    #[rstest]
    fn selection_skips_candidates_without_location(mut session: PlannerSession<RecordingProvider>) {
        session.places_selected(vec![
            candidate("First", 1.0),
            PlaceCandidate::unresolved("Nowhere", ""),
            candidate("Third", 3.0),
        ]);
        assert_eq!(names(&session), ["First", "Third"]);
        let ids: Vec<_> = session.itinerary().ids().collect();
        assert_ne!(ids[0], ids[1]);
        let canvas = session.canvas().expect("attached");
        assert_eq!(canvas.live_markers().len(), 2);
        assert_eq!(canvas.live_popups().len(), 2);
    }

    #[rstest]
    fn selection_focuses_last_valid_candidate_and_clears_input(
        mut session: PlannerSession<RecordingProvider>,
    ) {
        session.places_selected(vec![
            candidate("First", 1.0),
            candidate("Second", 2.0),
            PlaceCandidate::unresolved("Nowhere", ""),
        ]);
        let canvas = session.canvas().expect("attached");
        assert_eq!(canvas.center(), Some(Coord { x: 2.0, y: 0.0 }));
        assert_eq!(canvas.zoom(), Some(15));
        assert_eq!(canvas.search_clears(), 1);
    }

    #[rstest]
    fn empty_selection_changes_nothing(mut session: PlannerSession<RecordingProvider>) {
        session.places_selected(Vec::new());
        assert!(session.places().is_empty());
        let canvas = session.canvas().expect("attached");
        assert_eq!(canvas.search_clears(), 0);
        assert_eq!(canvas.zoom(), Some(12));
    }

    #[rstest]
    fn fully_unresolved_batch_clears_input_without_panning(
        mut session: PlannerSession<RecordingProvider>,
    ) {
        let initial_center = session.config().initial_viewport.center;
        session.places_selected(vec![PlaceCandidate::unresolved("Nowhere", "")]);
        assert!(session.places().is_empty());
        let canvas = session.canvas().expect("attached");
        assert_eq!(canvas.center(), Some(initial_center));
        assert_eq!(canvas.zoom(), Some(12));
        assert_eq!(canvas.search_clears(), 1);
    }

    #[rstest]
    fn popup_carries_name_and_address(mut session: PlannerSession<RecordingProvider>) {
        session.places_selected(vec![candidate("Museum", 1.0)]);
        let place = &session.places()[0];
        let canvas = session.canvas().expect("attached");
        assert_eq!(
            canvas.popup_content(place.popup),
            Some("Museum\nMuseum street")
        );
    }

    #[rstest]
    fn every_listed_place_has_a_live_marker(abc_session: PlannerSession<RecordingProvider>) {
        let canvas = abc_session.canvas().expect("attached");
        for place in abc_session.places() {
            assert!(canvas.live_markers().contains(&place.marker));
        }
    }

    #[rstest]
    fn remove_releases_marker_and_popup(mut abc_session: PlannerSession<RecordingProvider>) {
        let removed = abc_session.places()[1].clone();
        abc_session.remove_place(removed.id);
        assert_eq!(names(&abc_session), ["A", "C"]);
        let canvas = abc_session.canvas().expect("attached");
        assert!(!canvas.live_markers().contains(&removed.marker));
        assert!(!canvas.live_popups().contains(&removed.popup));
        assert_eq!(canvas.live_markers().len(), 2);
    }

    #[rstest]
    fn removing_twice_is_a_noop(mut abc_session: PlannerSession<RecordingProvider>) {
        let id = abc_session.places()[0].id;
        abc_session.remove_place(id);
        abc_session.remove_place(id);
        assert_eq!(names(&abc_session), ["B", "C"]);
    }

    #[rstest]
    fn removing_unknown_id_is_a_noop(mut abc_session: PlannerSession<RecordingProvider>) {
        abc_session.remove_place(PlaceId::new(999));
        assert_eq!(abc_session.places().len(), 3);
    }

    #[rstest]
    fn clear_all_releases_everything_and_is_idempotent(
        mut abc_session: PlannerSession<RecordingProvider>,
    ) {
        abc_session.clear_all();
        assert!(abc_session.places().is_empty());
        {
            let canvas = abc_session.canvas().expect("attached");
            assert!(canvas.live_markers().is_empty());
            assert!(canvas.live_popups().is_empty());
        }
        abc_session.clear_all();
        assert!(abc_session.places().is_empty());
    }

    #[rstest]
    fn drag_started_marks_the_entry(mut abc_session: PlannerSession<RecordingProvider>) {
        abc_session.drag_started(1);
        assert_eq!(abc_session.interaction(), Interaction::Dragging { index: 1 });
        // The list itself is untouched while the gesture is in flight.
        assert_eq!(names(&abc_session), ["A", "B", "C"]);
    }

    #[rstest]
    fn drag_started_out_of_range_is_ignored(mut abc_session: PlannerSession<RecordingProvider>) {
        abc_session.drag_started(7);
        assert_eq!(abc_session.interaction(), Interaction::Idle);
    }

    #[rstest]
    fn cancelled_drag_leaves_order_unchanged(mut abc_session: PlannerSession<RecordingProvider>) {
        let before: Vec<_> = abc_session.itinerary().ids().collect();
        abc_session.drag_started(0);
        abc_session.drag_ended(DragOutcome::cancelled(0));
        let after: Vec<_> = abc_session.itinerary().ids().collect();
        assert_eq!(before, after);
        assert_eq!(abc_session.interaction(), Interaction::Idle);
    }

    #[rstest]
    fn resolved_drag_moves_first_place_to_the_end(
        mut abc_session: PlannerSession<RecordingProvider>,
    ) {
        abc_session.drag_started(0);
        abc_session.drag_ended(DragOutcome::moved(0, 2));
        assert_eq!(names(&abc_session), ["B", "C", "A"]);
        assert_eq!(abc_session.interaction(), Interaction::Idle);
    }

    #[rstest]
    fn out_of_range_drop_is_rejected(mut abc_session: PlannerSession<RecordingProvider>) {
        abc_session.drag_ended(DragOutcome::moved(0, 9));
        assert_eq!(names(&abc_session), ["A", "B", "C"]);
    }

    #[rstest]
    fn viewport_change_biases_search(mut session: PlannerSession<RecordingProvider>) {
        let bounds = Rect::new(Coord { x: -1.0, y: -1.0 }, Coord { x: 1.0, y: 1.0 });
        session.viewport_changed(bounds);
        let canvas = session.canvas().expect("attached");
        assert_eq!(canvas.search_bounds(), Some(bounds));
    }

    #[rstest]
    fn events_dispatch_to_the_matching_operation(mut session: PlannerSession<RecordingProvider>) {
        session.handle(PlannerEvent::PlacesSelected(vec![
            candidate("A", 1.0),
            candidate("B", 2.0),
            candidate("C", 3.0),
        ]));
        assert_eq!(names(&session), ["A", "B", "C"]);

        session.handle(PlannerEvent::DragStarted { index: 0 });
        assert!(session.interaction().is_dragging());
        session.handle(PlannerEvent::DragEnded(DragOutcome::moved(0, 2)));
        assert_eq!(names(&session), ["B", "C", "A"]);

        let id = session.places()[0].id;
        session.handle(PlannerEvent::RemovePlace(id));
        assert_eq!(names(&session), ["C", "A"]);

        session.handle(PlannerEvent::ClearAll);
        assert!(session.places().is_empty());
    }

    #[rstest]
    fn detached_session_noops_every_operation() {
        let mut provider = MissingTargetProvider;
        let mut detached = PlannerSession::mount(&mut provider, PlannerConfig::default());
        assert!(!detached.is_attached());

        detached.places_selected(vec![candidate("A", 1.0)]);
        detached.remove_place(PlaceId::new(0));
        detached.clear_all();
        detached.viewport_changed(Rect::new(
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
        ));
        detached.drag_started(0);
        detached.drag_ended(DragOutcome::moved(0, 1));

        assert!(detached.places().is_empty());
        assert!(detached.canvas().is_none());
    }

    #[rstest]
    fn close_releases_canvas_and_all_visuals(mut abc_session: PlannerSession<RecordingProvider>) {
        let canvas = abc_session.close().expect("first close yields the canvas");
        assert!(canvas.is_released());
        assert!(canvas.live_markers().is_empty());
        assert!(abc_session.places().is_empty());
        assert!(!abc_session.is_attached());
        assert!(abc_session.close().is_none());
    }

    #[rstest]
    fn remount_after_close_starts_clean() {
        let mut provider = RecordingProvider::default();
        let mut first = PlannerSession::mount(&mut provider, PlannerConfig::default());
        first.places_selected(vec![candidate("A", 1.0)]);
        drop(first);

        let second = PlannerSession::mount(&mut provider, PlannerConfig::default());
        assert_eq!(provider.acquisitions(), 2);
        assert!(second.places().is_empty());
        let canvas = second.canvas().expect("attached");
        assert!(canvas.live_markers().is_empty());
    }

    #[rstest]
    #[case("Museum", "1 Main St", "Museum\n1 Main St")]
    #[case("Museum", "", "Museum")]
    fn popup_content_formats(#[case] name: &str, #[case] address: &str, #[case] expected: &str) {
        assert_eq!(popup_content(name, address), expected);
    }
}

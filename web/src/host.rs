use core::time::Duration;
use gloo::timers::callback::Timeout;
use memento_core as game;
use yew::Callback;

/// Image shown on every face-down card.
pub(crate) const BACK_FACE: &str = "doscarte.png";

/// Distinct card images shipped with the page.
pub(crate) const FACE_COUNT: u8 = 6;

/// Card images named `carte1.png`, `carte2.png`, ...
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct AssetCatalog {
    faces: u8,
}

impl AssetCatalog {
    pub(crate) const fn new(faces: u8) -> Self {
        Self { faces }
    }

    pub(crate) const fn slot_count(self) -> usize {
        self.faces as usize * 2
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new(FACE_COUNT)
    }
}

impl game::CardCatalog for AssetCatalog {
    fn distinct_faces(&self) -> Vec<game::CardFace> {
        (1..=self.faces)
            .map(|i| game::CardFace::new(format!("carte{i}.png")))
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct SlotView {
    pub status: game::SlotStatus,
    pub face: Option<game::CardFace>,
    pub clickable: bool,
}

impl SlotView {
    pub(crate) fn image_src(&self) -> &str {
        match (&self.face, self.status.shows_face()) {
            (Some(face), true) => face.as_str(),
            _ => BACK_FACE,
        }
    }
}

/// Render buffer the game view draws from.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BoardSurface {
    slots: Vec<SlotView>,
}

impl BoardSurface {
    pub(crate) fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![SlotView::default(); slot_count],
        }
    }

    pub(crate) fn slots(&self) -> &[SlotView] {
        &self.slots
    }
}

impl game::SlotRegistry for BoardSurface {
    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn bind_click(&mut self, index: game::SlotIndex) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.clickable = true;
        }
    }

    fn render_slot(
        &mut self,
        index: game::SlotIndex,
        status: game::SlotStatus,
        face: Option<&game::CardFace>,
    ) {
        log::trace!("render slot {} as {:?}", index, status);
        if let Some(slot) = self.slots.get_mut(index) {
            slot.status = status;
            slot.face = face.cloned();
        }
    }
}

/// Shows notices as a blocking browser alert.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct AlertNotifier;

impl game::Notifier for AlertNotifier {
    fn notify(&mut self, notice: game::Notice) {
        log::info!("{:?}", notice);
        gloo::dialogs::alert(notice.message());
    }
}

/// Fires deferred tasks back into the component through `on_fire`.
pub(crate) struct TimeoutScheduler {
    on_fire: Callback<game::DeferredTask>,
}

impl TimeoutScheduler {
    pub(crate) fn new(on_fire: Callback<game::DeferredTask>) -> Self {
        Self { on_fire }
    }
}

impl game::Scheduler for TimeoutScheduler {
    fn schedule(&mut self, delay: Duration, task: game::DeferredTask) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let on_fire = self.on_fire.clone();
        // never cancelled, stale tasks are filtered by their epoch
        let _ = Timeout::new(millis, move || on_fire.emit(task)).forget();
    }
}

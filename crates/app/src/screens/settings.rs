use crate::errors::SettingsResult;
use crate::screens::{link_line, switch_line, ScreenView};
use crate::settings::{SettingsModel, SettingsState, ToggleOutcome};

/// Mosaic settings page.
pub struct SettingsScreen {
    model: SettingsModel,
}

impl SettingsScreen {
    pub fn new(model: SettingsModel) -> Self {
        Self { model }
    }

    pub fn state(&self) -> &SettingsState {
        self.model.state()
    }

    pub fn model_mut(&mut self) -> &mut SettingsModel {
        &mut self.model
    }

    pub async fn set_mosaic(&mut self, enabled: bool) -> SettingsResult<()> {
        self.model.set_mosaic_enabled(enabled).await
    }

    pub async fn set_face_blur(&mut self, enabled: bool) -> SettingsResult<ToggleOutcome> {
        self.model.set_face_blur_enabled(enabled).await
    }

    pub async fn set_plate_blur(&mut self, enabled: bool) -> SettingsResult<ToggleOutcome> {
        self.model.set_plate_blur_enabled(enabled).await
    }

    pub async fn set_blur_intensity(&mut self, value: f32) -> SettingsResult<f32> {
        self.model.set_blur_intensity(value).await
    }

    pub fn face_register_enabled(&self) -> bool {
        let state = self.state();
        state.mosaic_enabled && state.face_blur_enabled
    }

    /// The face list opens only under an active face blur and with at least
    /// one registered face.
    pub fn face_list_enabled(&self) -> bool {
        self.face_register_enabled() && self.state().registered_face_count() > 0
    }

    pub fn view(&self) -> ScreenView {
        let state = self.state();
        let sub_enabled = state.sub_toggles_enabled();

        let mut view = ScreenView::new("설정")
            .line(switch_line("모자이크", state.mosaic_enabled, true))
            .line(switch_line("얼굴 블러", state.face_blur_enabled, sub_enabled))
            .line(switch_line("번호판 블러", state.plate_blur_enabled, sub_enabled));

        if state.mosaic_enabled {
            view.push(format!("블러 강도: {:.0}", state.blur_intensity));
        }

        view.push(link_line("얼굴 등록하기", self.face_register_enabled()));
        view.push(link_line(
            &format!("등록된 얼굴 ({}개)", state.registered_face_count()),
            self.face_list_enabled(),
        ));
        view
    }
}

//! Face registration and the list of registered faces.

use crate::errors::SettingsResult;
use crate::screens::{link_line, ScreenView};
use crate::settings::SettingsModel;

pub struct FaceRegisterScreen {
    model: SettingsModel,
    added_this_visit: Vec<String>,
}

impl FaceRegisterScreen {
    pub fn new(model: SettingsModel) -> Self {
        Self {
            model,
            added_this_visit: Vec::new(),
        }
    }

    pub fn added_this_visit(&self) -> &[String] {
        &self.added_this_visit
    }

    pub fn registered_count(&self) -> usize {
        self.model.state().registered_face_count()
    }

    pub async fn add_face(&mut self) -> SettingsResult<String> {
        let name = self.model.register_face().await?;
        self.added_this_visit.push(name.clone());
        Ok(name)
    }

    pub fn view(&self) -> ScreenView {
        let mut view = ScreenView::new("얼굴 등록");
        for name in &self.added_this_visit {
            view.push(format!("- {name}"));
        }
        view.push(link_line(
            &format!("등록된 얼굴 목록 ({}개)", self.registered_count()),
            self.registered_count() > 0,
        ));
        view.push(link_line("목록 추가하기 (+1)", true));
        view
    }
}

pub struct FaceListScreen {
    model: SettingsModel,
}

impl FaceListScreen {
    pub fn new(model: SettingsModel) -> Self {
        Self { model }
    }

    pub fn faces(&self) -> &[String] {
        &self.model.state().face_names
    }

    pub async fn add_face(&mut self) -> SettingsResult<String> {
        self.model.register_face().await
    }

    /// Delete the entry at a 0-based position in the displayed list.
    pub async fn remove_at(&mut self, index: usize) -> SettingsResult<String> {
        self.model.remove_face_at(index).await
    }

    pub fn view(&self) -> ScreenView {
        let mut view = ScreenView::new(format!("등록된 얼굴 ({}개)", self.faces().len()));
        if self.faces().is_empty() {
            view.push("등록된 얼굴이 없습니다.");
        }
        for (position, name) in self.faces().iter().enumerate() {
            view.push(format!("{}. {name} [삭제]", position + 1));
        }
        view.push(link_line("임의 등록 추가하기 (+1)", true));
        view
    }
}

//! The app shell: owns navigation, services and the mounted screen.

use mozik_auth::AuthClient;
use mozik_preferences::PreferenceStore;
use tracing::{debug, info};

use crate::errors::{AppError, AppResult};
use crate::navigation::{Destination, NavController, Tab};
use crate::screens::{
    CameraScreen, FaceListScreen, FaceRegisterScreen, GalleryScreen, LoginScreen, MenuItem,
    ScreenView, SettingsScreen, SignupScreen, VideoProcessorScreen,
};
use crate::settings::{SettingsModel, ToggleOutcome};

pub const APP_NAME: &str = "Mozik";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text inputs on the auth forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    Nickname,
}

/// One user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Destination),
    Back,
    SelectTab(Tab),
    Menu(MenuItem),
    SetField(Field, String),
    Submit,
    SetMosaic(bool),
    SetFaceBlur(bool),
    SetPlateBlur(bool),
    SetBlurIntensity(f32),
    SetBlurSize(u32),
    SetBlurLevel(u32),
    OpenFaceRegister,
    OpenFaceList,
    AddFace,
    /// 0-based position in the displayed face list.
    RemoveFace(usize),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate(_) => "navigate",
            Action::Back => "back",
            Action::SelectTab(_) => "tab",
            Action::Menu(_) => "menu",
            Action::SetField(Field::Email, _) => "email",
            Action::SetField(Field::Password, _) => "password",
            Action::SetField(Field::Nickname, _) => "nickname",
            Action::Submit => "submit",
            Action::SetMosaic(_) => "mosaic",
            Action::SetFaceBlur(_) => "face blur",
            Action::SetPlateBlur(_) => "plate blur",
            Action::SetBlurIntensity(_) => "blur intensity",
            Action::SetBlurSize(_) => "blur size",
            Action::SetBlurLevel(_) => "blur level",
            Action::OpenFaceRegister => "face register",
            Action::OpenFaceList => "face list",
            Action::AddFace => "add face",
            Action::RemoveFace(_) => "remove face",
        }
    }
}

/// The screen currently mounted for the active destination.
pub enum Screen {
    Login(LoginScreen),
    Signup(SignupScreen),
    VideoProcessor(VideoProcessorScreen),
    Settings(SettingsScreen),
    Camera(CameraScreen),
    Gallery(GalleryScreen),
    FaceRegister(FaceRegisterScreen),
    FaceList(FaceListScreen),
}

impl Screen {
    /// Build a fresh screen, reading settings from the store where needed.
    async fn mount(destination: Destination, store: &PreferenceStore) -> AppResult<Self> {
        let screen = match destination {
            Destination::Login => Screen::Login(LoginScreen::new()),
            Destination::Signup => Screen::Signup(SignupScreen::new()),
            Destination::VideoProcessor => Screen::VideoProcessor(VideoProcessorScreen::new()),
            Destination::Camera => Screen::Camera(CameraScreen),
            Destination::Gallery => Screen::Gallery(GalleryScreen),
            Destination::Settings => {
                Screen::Settings(SettingsScreen::new(SettingsModel::load(store.clone()).await?))
            }
            Destination::FaceRegister => Screen::FaceRegister(FaceRegisterScreen::new(
                SettingsModel::load(store.clone()).await?,
            )),
            Destination::FaceList => {
                Screen::FaceList(FaceListScreen::new(SettingsModel::load(store.clone()).await?))
            }
        };
        Ok(screen)
    }

    pub fn view(&self) -> ScreenView {
        match self {
            Screen::Login(screen) => screen.view(),
            Screen::Signup(screen) => screen.view(),
            Screen::VideoProcessor(screen) => screen.view(),
            Screen::Settings(screen) => screen.view(),
            Screen::Camera(screen) => screen.view(),
            Screen::Gallery(screen) => screen.view(),
            Screen::FaceRegister(screen) => screen.view(),
            Screen::FaceList(screen) => screen.view(),
        }
    }
}

pub struct App {
    nav: NavController,
    store: PreferenceStore,
    auth: AuthClient,
    screen: Screen,
    notice: Option<String>,
}

impl App {
    pub fn start(store: PreferenceStore, auth: AuthClient) -> Self {
        let nav = NavController::new();
        info!(start = %nav.current(), "app started");
        Self {
            nav,
            store,
            auth,
            screen: Screen::Login(LoginScreen::new()),
            notice: None,
        }
    }

    /// Start on an arbitrary destination with an empty back-stack.
    pub async fn start_at(
        store: PreferenceStore,
        auth: AuthClient,
        destination: Destination,
    ) -> AppResult<Self> {
        let screen = Screen::mount(destination, &store).await?;
        info!(start = %destination, "app started");
        Ok(Self {
            nav: NavController::starting_at(destination),
            store,
            auth,
            screen,
            notice: None,
        })
    }

    pub fn current(&self) -> Destination {
        self.nav.current()
    }

    pub fn navigation(&self) -> &NavController {
        &self.nav
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Apply one action to the mounted screen or the navigation state.
    pub async fn dispatch(&mut self, action: Action) -> AppResult<()> {
        let at = self.current();
        debug!(action = action.name(), %at, "dispatch");
        self.notice = None;

        match action {
            Action::Navigate(destination) => {
                self.transition(|nav| nav.navigate(destination)).await
            }
            Action::Back => self.back().await,
            Action::SelectTab(tab) => {
                self.require_home("tab")?;
                let destination = tab.destination();
                self.transition(|nav| {
                    let changed = nav.current() != destination;
                    nav.replace(destination);
                    changed
                })
                .await
            }
            Action::Menu(item) => {
                self.require_home("menu")?;
                match item {
                    MenuItem::Settings => {
                        self.transition(|nav| nav.navigate(Destination::Settings))
                            .await
                    }
                    MenuItem::AppInfo => {
                        self.notice = Some(format!("{APP_NAME} v{APP_VERSION}"));
                        Ok(())
                    }
                }
            }
            Action::SetField(field, value) => self.set_field(field, value),
            Action::Submit => match &mut self.screen {
                Screen::Login(screen) => {
                    screen.submit(&self.auth);
                    Ok(())
                }
                Screen::Signup(screen) => {
                    screen.submit(&self.auth);
                    Ok(())
                }
                _ => Err(unsupported("submit", at)),
            },
            Action::SetMosaic(enabled) => {
                self.settings_screen("mosaic")?.set_mosaic(enabled).await?;
                Ok(())
            }
            Action::SetFaceBlur(enabled) => {
                let outcome = self.settings_screen("face blur")?.set_face_blur(enabled).await?;
                toggle_result(outcome, "face blur")
            }
            Action::SetPlateBlur(enabled) => {
                let outcome = self
                    .settings_screen("plate blur")?
                    .set_plate_blur(enabled)
                    .await?;
                toggle_result(outcome, "plate blur")
            }
            Action::SetBlurIntensity(value) => {
                let screen = self.settings_screen("blur intensity")?;
                if !screen.state().mosaic_enabled {
                    return Err(AppError::Disabled("blur intensity"));
                }
                screen.set_blur_intensity(value).await?;
                Ok(())
            }
            Action::SetBlurSize(value) => {
                self.video_screen("blur size")?.set_blur_size(value);
                Ok(())
            }
            Action::SetBlurLevel(value) => {
                self.video_screen("blur level")?.set_blur_level(value);
                Ok(())
            }
            Action::OpenFaceRegister => {
                if !self.settings_screen("face register")?.face_register_enabled() {
                    return Err(AppError::Disabled("face register"));
                }
                self.transition(|nav| nav.navigate(Destination::FaceRegister))
                    .await
            }
            Action::OpenFaceList => {
                let enabled = match &self.screen {
                    Screen::Settings(screen) => screen.face_list_enabled(),
                    Screen::FaceRegister(screen) => screen.registered_count() > 0,
                    _ => return Err(unsupported("face list", at)),
                };
                if !enabled {
                    return Err(AppError::Disabled("face list"));
                }
                self.transition(|nav| nav.navigate(Destination::FaceList))
                    .await
            }
            Action::AddFace => {
                let name = match &mut self.screen {
                    Screen::FaceRegister(screen) => screen.add_face().await?,
                    Screen::FaceList(screen) => screen.add_face().await?,
                    _ => return Err(unsupported("add face", at)),
                };
                self.notice = Some(format!("{name} 등록됨"));
                Ok(())
            }
            Action::RemoveFace(index) => match &mut self.screen {
                Screen::FaceList(screen) => {
                    let name = screen.remove_at(index).await?;
                    self.notice = Some(format!("{name} 삭제됨"));
                    Ok(())
                }
                _ => Err(unsupported("remove face", at)),
            },
        }
    }

    /// Whether the mounted screen has an auth request in flight.
    pub fn has_pending_request(&self) -> bool {
        match &self.screen {
            Screen::Login(screen) => screen.is_pending(),
            Screen::Signup(screen) => screen.is_pending(),
            _ => false,
        }
    }

    /// Wait for an in-flight auth request on the current screen and apply it.
    /// An accepted login carries its status over as the notice of the next
    /// screen. Dropping the future leaves the request pending.
    pub async fn settle(&mut self) -> AppResult<()> {
        let (next, status) = match &mut self.screen {
            Screen::Login(screen) => {
                let next = screen.settle().await;
                (next, screen.status().map(str::to_string))
            }
            Screen::Signup(screen) => {
                screen.settle().await;
                (None, None)
            }
            _ => (None, None),
        };

        if let Some(destination) = next {
            info!(to = %destination, "login accepted");
            self.transition(|nav| nav.navigate(destination)).await?;
            self.notice = status;
        }
        Ok(())
    }

    /// The mounted screen plus top bar and tabs on home destinations.
    pub fn view(&self) -> ScreenView {
        let mut view = self.screen.view();
        let current = self.current();

        if current.is_home() {
            let menu = MenuItem::ALL
                .iter()
                .map(|item| item.label())
                .collect::<Vec<_>>()
                .join(" | ");
            view.lines.insert(0, format!("{APP_NAME}  ⋮ {menu}"));

            let tabs = Tab::ALL
                .iter()
                .map(|tab| {
                    if Some(*tab) == current.tab() {
                        format!("[{}]", tab.label())
                    } else {
                        tab.label().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            view.push(tabs);
        }

        if let Some(notice) = &self.notice {
            view.push(notice.clone());
        }
        view
    }

    async fn back(&mut self) -> AppResult<()> {
        let settings = self.current() == Destination::Settings;
        self.transition(|nav| {
            if nav.pop() {
                return true;
            }
            if settings {
                nav.replace(Destination::VideoProcessor);
                return true;
            }
            false
        })
        .await
    }

    /// Change navigation state and mount the new destination. Navigation is
    /// rolled back when the screen cannot be mounted.
    async fn transition<F>(&mut self, change: F) -> AppResult<()>
    where
        F: FnOnce(&mut NavController) -> bool,
    {
        let previous = self.nav.clone();
        if !change(&mut self.nav) {
            return Ok(());
        }

        match Screen::mount(self.nav.current(), &self.store).await {
            Ok(screen) => {
                self.screen = screen;
                Ok(())
            }
            Err(error) => {
                self.nav = previous;
                Err(error)
            }
        }
    }

    fn set_field(&mut self, field: Field, value: String) -> AppResult<()> {
        let at = self.current();
        match (&mut self.screen, field) {
            (Screen::Login(screen), Field::Email) => screen.email = value,
            (Screen::Login(screen), Field::Password) => screen.password = value,
            (Screen::Signup(screen), Field::Email) => screen.email = value,
            (Screen::Signup(screen), Field::Password) => screen.password = value,
            (Screen::Signup(screen), Field::Nickname) => screen.nickname = value,
            (_, field) => {
                let name = Action::SetField(field, String::new()).name();
                return Err(unsupported(name, at));
            }
        }
        Ok(())
    }

    fn require_home(&self, action: &'static str) -> AppResult<()> {
        if self.current().is_home() {
            Ok(())
        } else {
            Err(unsupported(action, self.current()))
        }
    }

    fn settings_screen(&mut self, action: &'static str) -> AppResult<&mut SettingsScreen> {
        let destination = self.current();
        match &mut self.screen {
            Screen::Settings(screen) => Ok(screen),
            _ => Err(unsupported(action, destination)),
        }
    }

    fn video_screen(&mut self, action: &'static str) -> AppResult<&mut VideoProcessorScreen> {
        let destination = self.current();
        match &mut self.screen {
            Screen::VideoProcessor(screen) => Ok(screen),
            _ => Err(unsupported(action, destination)),
        }
    }
}

fn unsupported(action: &'static str, destination: Destination) -> AppError {
    AppError::Unsupported {
        action,
        destination,
    }
}

fn toggle_result(outcome: ToggleOutcome, switch: &'static str) -> AppResult<()> {
    match outcome {
        ToggleOutcome::Applied => Ok(()),
        ToggleOutcome::Disabled => Err(AppError::Disabled(switch)),
    }
}

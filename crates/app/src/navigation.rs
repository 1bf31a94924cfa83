//! Destination graph and back-stack.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::errors::NavigationError;

/// Every screen the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Login,
    Signup,
    VideoProcessor,
    Settings,
    Camera,
    Gallery,
    FaceRegister,
    FaceList,
}

impl Destination {
    pub const ALL: [Destination; 8] = [
        Destination::Login,
        Destination::Signup,
        Destination::VideoProcessor,
        Destination::Settings,
        Destination::Camera,
        Destination::Gallery,
        Destination::FaceRegister,
        Destination::FaceList,
    ];

    pub fn route(self) -> &'static str {
        match self {
            Destination::Login => "login",
            Destination::Signup => "signup",
            Destination::VideoProcessor => "video_processor",
            Destination::Settings => "settings",
            Destination::Camera => "camera",
            Destination::Gallery => "gallery",
            Destination::FaceRegister => "face_register",
            Destination::FaceList => "face_list",
        }
    }

    /// Destinations reachable from the bottom tab bar.
    pub fn tab(self) -> Option<Tab> {
        match self {
            Destination::VideoProcessor => Some(Tab::VideoProcessor),
            Destination::Camera => Some(Tab::Camera),
            Destination::Gallery => Some(Tab::Gallery),
            _ => None,
        }
    }

    pub fn is_home(self) -> bool {
        self.tab().is_some()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

impl FromStr for Destination {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Destination::ALL
            .into_iter()
            .find(|destination| destination.route() == s)
            .ok_or_else(|| NavigationError::UnknownRoute(s.to_string()))
    }
}

/// Bottom navigation tabs on the home screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    VideoProcessor,
    Camera,
    Gallery,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::VideoProcessor, Tab::Camera, Tab::Gallery];

    pub fn label(self) -> &'static str {
        match self {
            Tab::VideoProcessor => "영상처리기",
            Tab::Camera => "카메라",
            Tab::Gallery => "갤러리",
        }
    }

    pub fn destination(self) -> Destination {
        match self {
            Tab::VideoProcessor => Destination::VideoProcessor,
            Tab::Camera => Destination::Camera,
            Tab::Gallery => Destination::Gallery,
        }
    }
}

/// Current destination plus the history needed for a single-step back.
#[derive(Debug, Clone)]
pub struct NavController {
    current: Destination,
    back_stack: Vec<Destination>,
}

impl NavController {
    pub const START: Destination = Destination::Login;

    pub fn new() -> Self {
        Self::starting_at(Self::START)
    }

    pub fn starting_at(start: Destination) -> Self {
        Self {
            current: start,
            back_stack: Vec::new(),
        }
    }

    pub fn current(&self) -> Destination {
        self.current
    }

    pub fn back_stack(&self) -> &[Destination] {
        &self.back_stack
    }

    /// Push the current destination and move to `destination`. Returns
    /// `false` when already there.
    pub fn navigate(&mut self, destination: Destination) -> bool {
        if destination == self.current {
            return false;
        }
        debug!(from = %self.current, to = %destination, "navigate");
        self.back_stack.push(self.current);
        self.current = destination;
        true
    }

    pub fn navigate_route(&mut self, route: &str) -> Result<bool, NavigationError> {
        let destination = route.parse()?;
        Ok(self.navigate(destination))
    }

    /// Return to the previous destination; no-op on an empty back-stack.
    pub fn pop(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(previous) => {
                debug!(from = %self.current, to = %previous, "pop");
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Swap the current destination without recording history.
    pub fn replace(&mut self, destination: Destination) {
        debug!(from = %self.current, to = %destination, "replace");
        self.current = destination;
    }
}

impl Default for NavController {
    fn default() -> Self {
        Self::new()
    }
}

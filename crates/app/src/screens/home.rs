//! Home destinations behind the bottom tab bar.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::screens::{link_line, ScreenView};

pub const BLUR_SIZE_RANGE: RangeInclusive<u8> = 0..=10;
pub const BLUR_LEVEL_RANGE: RangeInclusive<u8> = 0..=100;

/// Slider values live only as long as the screen; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoProcessorScreen {
    blur_size: u8,
    blur_level: u8,
}

impl VideoProcessorScreen {
    pub const DEFAULT_BLUR_SIZE: u8 = 2;
    pub const DEFAULT_BLUR_LEVEL: u8 = 20;

    pub fn new() -> Self {
        Self {
            blur_size: Self::DEFAULT_BLUR_SIZE,
            blur_level: Self::DEFAULT_BLUR_LEVEL,
        }
    }

    pub fn blur_size(&self) -> u8 {
        self.blur_size
    }

    pub fn blur_level(&self) -> u8 {
        self.blur_level
    }

    pub fn set_blur_size(&mut self, value: u32) -> u8 {
        self.blur_size = clamp_slider(value, &BLUR_SIZE_RANGE);
        self.blur_size
    }

    pub fn set_blur_level(&mut self, value: u32) -> u8 {
        self.blur_level = clamp_slider(value, &BLUR_LEVEL_RANGE);
        self.blur_level
    }

    pub fn view(&self) -> ScreenView {
        ScreenView::new("영상처리기")
            .line(format!("블러 크기: {}", self.blur_size))
            .line(format!("블러 강도: {}", self.blur_level))
            .line(link_line("🎞 영상 선택하기", true))
    }
}

impl Default for VideoProcessorScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_slider(value: u32, range: &RangeInclusive<u8>) -> u8 {
    let clamped = value.clamp(u32::from(*range.start()), u32::from(*range.end()));
    u8::try_from(clamped).unwrap_or(*range.end())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraScreen;

impl CameraScreen {
    pub fn view(&self) -> ScreenView {
        ScreenView::new("카메라").line("📷 카메라 화면")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GalleryScreen;

impl GalleryScreen {
    pub fn view(&self) -> ScreenView {
        ScreenView::new("갤러리").line("🖼 갤러리 목록")
    }
}

/// Entries of the top bar overflow menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Settings,
    AppInfo,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Settings, MenuItem::AppInfo];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Settings => "설정",
            MenuItem::AppInfo => "앱 정보",
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MenuItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "settings" | "설정" => Ok(MenuItem::Settings),
            "info" | "about" | "앱 정보" => Ok(MenuItem::AppInfo),
            other => Err(format!("unknown menu item: {other}")),
        }
    }
}

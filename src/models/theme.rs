// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Visual mode of the page.

use serde::{Deserialize, Serialize};

/// Dark or light page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Dark => "◑",
            Self::Light => "◐",
        }
    }

    /// Tooltip for the toggle button.
    pub fn toggle_label(self) -> String {
        let next = match self.toggled() {
            Self::Dark => "dark",
            Self::Light => "light",
        };
        format!("Switch to {next} mode")
    }
}

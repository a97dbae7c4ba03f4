// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for portfolio pages.

pub mod page;
pub mod theme;

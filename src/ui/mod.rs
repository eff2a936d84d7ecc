// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentational building blocks shared by the app's screens.

pub mod screen;

pub use screen::{
    ContainerStyle, Edge, EdgeSet, Padding, RenderedScreen, SafeAreaInsets, ScreenWrapper,
    StatusBarConfig, StatusBarHost, StatusBarStyle,
};

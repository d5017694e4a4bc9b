// SPDX-FileCopyrightText: 2024 Ohin "Kazani" Taylor <kazani@kazani.dev>
// SPDX-License-Identifier: MIT

pub mod artists;
pub mod config;
pub mod error;
pub mod feed;
pub mod generator;
pub mod logging;
pub mod markdown;
pub mod post;
pub mod repository;
pub mod template;

pub use error::{Error, Result};

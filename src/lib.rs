// SPDX-License-Identifier: GPL-3.0-or-later

pub mod args;
pub mod config;
pub mod events;
pub mod output;
pub mod scanner;

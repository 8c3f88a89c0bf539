//! LINE Webhook Server
//!
//! Verifies `X-Line-Signature` on inbound Messaging API callbacks and hands
//! the decoded events to a consumer task.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod webhook;

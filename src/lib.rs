//! Dormitory electricity balance sensor for the CSUST campus one-card service.
//!
//! A [`sensor::ElectricitySensor`] holds one room's identity and its latest
//! [`domain::Reading`]; the [`controller::PollController`] refreshes it on a
//! fixed interval through a [`fetcher::SynjonesFetcher`].

pub mod config;
pub mod controller;
pub mod domain;
pub mod fetcher;
pub mod sensor;
pub mod telemetry;

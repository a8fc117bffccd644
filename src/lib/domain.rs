//! Domain logic

pub mod campaigns;
pub mod communication;

//! Extension traits

mod depot;
mod result;
mod service_time;

pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use service_time::ServiceTimeExt as _;

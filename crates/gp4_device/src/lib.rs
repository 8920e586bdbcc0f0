//! GreenPAK4 device models for the gp4 toolchain.
//!
//! A [`Device`] enumerates every physical resource of one GreenPAK4 part as
//! a list of [`Site`]s, grouped by [`SiteKind`] and ordered for reproducible
//! graph construction. The only fully described part is the SLG46620
//! ([`Device::slg46620`]); smaller family members share the site model but
//! have no descriptor yet.
//!
//! The device model carries just enough physical detail for place and route:
//! per-site routing terminals (general-fabric input and output port names),
//! the matrix each site belongs to, and the bitstream base addresses the
//! emitter needs later. Configuration-bit packing itself is a collaborator
//! concern.

#![warn(missing_docs)]

pub mod device;
pub mod ids;
pub mod site;
pub mod slg46620;

pub use device::{Device, Part};
pub use ids::SiteId;
pub use site::{IobFlavor, IobInfo, Site, SiteKind};

/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

mod family;
pub use family::AddressFamily;

mod address;
pub use address::RangeAddr;

mod range;
pub use range::IpRange;

mod continent;
pub use continent::ContinentCode;

mod error;
pub use error::{AddressError, FamilyMismatch, RangeError};

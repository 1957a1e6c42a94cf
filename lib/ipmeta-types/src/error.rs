/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 SecWrk and/or its affiliates.
 */

use thiserror::Error;

use crate::RangeAddr;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid ip address text {0:?}")]
    Invalid(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("address family mismatch")]
pub struct FamilyMismatch;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("range bounds belong to different address families")]
    FamilyMismatch,
    #[error("range start {start} is greater than range end {end}")]
    Inverted { start: RangeAddr, end: RangeAddr },
}

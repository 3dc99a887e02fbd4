// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("No database named '{0}' in the configuration")]
    DbConfigError(String),

    #[error("Store connection lock was poisoned")]
    PoisonedLock,

    #[error("Rating for user({0}) on movie({1}) already exists")]
    DuplicateRating(i32, i32),
}

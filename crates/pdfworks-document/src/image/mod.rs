// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: decoding, alpha flattening, and PNG encoding.

pub mod processor;

pub use processor::ImageProcessor;

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 传输引擎模块
///
/// 传输层特质（traits）与基于reqwest的实现（reqwest_engine）
pub mod reqwest_engine;
pub mod traits;

pub use reqwest_engine::ReqwestTransport;
pub use traits::{RawResponse, Transport, TransportError, TransportRequest};

// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 包含与百度各站点打交道的具体实现：
/// - 搜索（search）：各垂类的请求构造、拦截识别与结果定位
pub mod search;

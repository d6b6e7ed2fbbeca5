//! City resolution tables.
//!
//! The provider matches some Chinese city names poorly, so well-known
//! cities are resolved to provider ids first and to pinyin names as a
//! fallback.

use std::collections::HashMap;

/// OpenWeatherMap city ids for major Chinese cities.
const CITY_IDS: &[(&str, u64)] = &[
    ("北京", 1816670),
    ("上海", 1796236),
    ("广州", 1809858),
    ("深圳", 1795565),
    ("成都", 1815286),
    ("重庆", 1814906),
    ("杭州", 1808926),
    ("武汉", 1791247),
    ("西安", 1790630),
    ("南京", 1799962),
    ("天津", 1792947),
    ("苏州", 1795940),
    ("郑州", 1784658),
    ("长沙", 1815577),
    ("青岛", 1797929),
    ("沈阳", 2034937),
    ("大连", 1814087),
    ("厦门", 1790923),
    ("济南", 1805753),
];

/// Pinyin names for the same cities.
const CITY_NAMES: &[(&str, &str)] = &[
    ("北京", "Beijing"),
    ("上海", "Shanghai"),
    ("广州", "Guangzhou"),
    ("深圳", "Shenzhen"),
    ("成都", "Chengdu"),
    ("重庆", "Chongqing"),
    ("杭州", "Hangzhou"),
    ("武汉", "Wuhan"),
    ("西安", "Xian"),
    ("南京", "Nanjing"),
    ("天津", "Tianjin"),
    ("苏州", "Suzhou"),
    ("郑州", "Zhengzhou"),
    ("长沙", "Changsha"),
    ("青岛", "Qingdao"),
    ("沈阳", "Shenyang"),
    ("大连", "Dalian"),
    ("厦门", "Xiamen"),
    ("济南", "Jinan"),
];

/// Read-only city lookup built once at startup.
#[derive(Debug, Clone)]
pub struct CityDirectory {
    ids: HashMap<String, u64>,
    transliterations: HashMap<String, String>,
}

impl Default for CityDirectory {
    fn default() -> Self {
        Self::new(
            CITY_IDS.iter().map(|(name, id)| (name.to_string(), *id)),
            CITY_NAMES
                .iter()
                .map(|(name, alt)| (name.to_string(), alt.to_string())),
        )
    }
}

impl CityDirectory {
    pub fn new(
        ids: impl IntoIterator<Item = (String, u64)>,
        transliterations: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            transliterations: transliterations.into_iter().collect(),
        }
    }

    /// Provider id for a known city.
    pub fn id_of(&self, city: &str) -> Option<u64> {
        self.ids.get(city).copied()
    }

    /// Alternate-script name for a known city.
    pub fn transliteration_of(&self, city: &str) -> Option<&str> {
        self.transliterations.get(city).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

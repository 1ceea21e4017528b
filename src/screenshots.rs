use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    OneMinute,
    FiveMinute,
    FifteenMinute,
    OneHour,
    FourHour,
    Daily,
    Weekly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 7] = [
        Timeframe::OneMinute,
        Timeframe::FiveMinute,
        Timeframe::FifteenMinute,
        Timeframe::OneHour,
        Timeframe::FourHour,
        Timeframe::Daily,
        Timeframe::Weekly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::OneMinute => "1-Minute",
            Timeframe::FiveMinute => "5-Minute",
            Timeframe::FifteenMinute => "15-Minute",
            Timeframe::OneHour => "1-Hour",
            Timeframe::FourHour => "4-Hour",
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Timeframe::OneMinute => "1-minute",
            Timeframe::FiveMinute => "5-minute",
            Timeframe::FifteenMinute => "15-minute",
            Timeframe::OneHour => "1-hour",
            Timeframe::FourHour => "4-hour",
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
        }
    }

    pub fn screenshot_path(self) -> String {
        format!("/screenshots/{}.png", self.slug())
    }
}

/// Label → screenshot path for every timeframe, serialized in timeframe order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartScreenshots;

impl Serialize for ChartScreenshots {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Timeframe::ALL.len()))?;
        for timeframe in Timeframe::ALL {
            map.serialize_entry(timeframe.label(), &timeframe.screenshot_path())?;
        }
        map.end()
    }
}

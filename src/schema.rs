use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Times before 04:00 belong to the previous service day.
pub const SERVICE_DAY_START: u32 = 4 * 60;

pub static DEFAULT_STATIONS_SELECTOR: &str = "#stations";
pub static DEFAULT_TIMETABLE_SELECTOR: &str = "#timetable";

pub static SCHEDULE_FILE_SUFFIX: &str = "_schedule.json";

/// Minutes since midnight of the service day, or `None` where the train does not stop.
pub type NormalizedTime = Option<u32>;

/// The document handed to a sink.
///
/// `train_schedules[t][s]` is the time of train `t` at station `s`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    pub stations: Vec<String>,
    pub train_schedules: Vec<Vec<NormalizedTime>>,
}

impl ScheduleDocument {
    pub fn train_count(&self) -> usize {
        self.train_schedules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_and_null_for_absence() {
        let doc = ScheduleDocument {
            stations: vec!["A".to_string(), "B".to_string()],
            train_schedules: vec![vec![Some(480), None]],
        };

        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"stations":["A","B"],"trainSchedules":[[480,null]]}"#);
    }

    #[test]
    fn train_count_is_outer_length() {
        let doc = ScheduleDocument {
            stations: vec!["A".to_string()],
            train_schedules: vec![vec![Some(1)], vec![None], vec![Some(3)]],
        };
        assert_eq!(doc.train_count(), 3);
    }
}

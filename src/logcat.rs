//! Launch times out of a saved `adb logcat -d` dump.
//!
//! The activity manager logs `Displayed <package>/<activity> ...: +1s234ms`
//! once an activity drew its first frame; some Motorola builds log
//! `MotoDisplayed ...,<ms>` instead.

use super::average::NOT_AVAILABLE;
use super::error::Result;
use regex::Regex;

/// An activity to look for and the column its time goes to.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub column: String,
    /// component as logged after the package, e.g. `.HomeActivity`
    pub component: String,
}

impl Activity {
    pub fn new(column: &str, component: &str) -> Activity {
        Activity {
            column: column.to_string(),
            component: component.to_string(),
        }
    }
}

pub const DEFAULT_PACKAGE: &str = "com.eloelo";

/// splash, onboarding and home, in the column order of the iteration files
pub fn default_activities() -> Vec<Activity> {
    vec![
        Activity::new("SplashActivityNew", ".splash.view.SplashActivityNew"),
        Activity::new("OnBoardingActivity", ".splash.view.OnBoardingActivity"),
        Activity::new("HomeActivity", ".HomeActivity"),
    ]
}

const DISPLAYED_TIME: &str = r"\+(?:(\d+)s)?(\d+)ms";

#[derive(Debug, Clone)]
pub struct LogcatParser {
    activities: Vec<(Activity, Regex)>,
    any_displayed: Regex,
    moto_displayed: Regex,
}

impl LogcatParser {
    pub fn new(package: &str, activities: &[Activity]) -> Result<LogcatParser> {
        let mut compiled = Vec::with_capacity(activities.len());
        for a in activities {
            let component = regex::escape(&format!("{}/{}", package, a.component));
            let re = Regex::new(&format!(r"Displayed {}\b.*?: {}", component, DISPLAYED_TIME))?;
            compiled.push((a.clone(), re));
        }
        Ok(LogcatParser {
            activities: compiled,
            any_displayed: Regex::new(&format!(r"Displayed .*: {}", DISPLAYED_TIME))?,
            moto_displayed: Regex::new(r"MotoDisplayed .*?,(\d+)")?,
        })
    }

    pub fn columns(&self) -> Vec<&str> {
        self.activities.iter().map(|(a, _)| a.column.as_str()).collect()
    }

    /// Time of every activity in ms, the last launch in the dump wins.
    pub fn activity_times(&self, dump: &str) -> Vec<Option<u64>> {
        let mut times = vec![None; self.activities.len()];
        for line in dump.lines() {
            for (slot, (_, re)) in times.iter_mut().zip(self.activities.iter()) {
                if let Some(ms) = re.captures(line).and_then(|c| displayed_ms(&c)) {
                    *slot = Some(ms);
                }
            }
        }
        times
    }

    /// Time of the last launched activity of any app. A `Displayed` line
    /// anywhere in the dump is preferred over `MotoDisplayed` lines.
    pub fn launch_time(&self, dump: &str) -> Option<u64> {
        let mut displayed = None;
        let mut moto = None;
        for line in dump.lines() {
            if let Some(c) = self.any_displayed.captures(line) {
                if let Some(ms) = displayed_ms(&c) {
                    displayed = Some(ms);
                }
            } else if let Some(c) = self.moto_displayed.captures(line) {
                if let Some(ms) = c.get(1).and_then(|m| m.as_str().parse().ok()) {
                    moto = Some(ms);
                }
            }
        }
        displayed.or(moto)
    }
}

/// `+1s234ms` is 1234, `+850ms` is 850
fn displayed_ms(caps: &regex::Captures) -> Option<u64> {
    let seconds: u64 = match caps.get(1) {
        Some(s) => s.as_str().parse().ok()?,
        None => 0,
    };
    let millis: u64 = caps.get(2)?.as_str().parse().ok()?;
    Some(seconds * 1000 + millis)
}

/// csv cell of a launch time, N/A when the activity never showed up
pub fn cell(time: Option<u64>) -> String {
    match time {
        Some(ms) => ms.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "\
03-12 10:00:01.000  1500  1530 I ActivityTaskManager: START u0 {cmp=com.eloelo/.splash.view.SplashActivityNew}
03-12 10:00:02.234  1500  1530 I ActivityTaskManager: Displayed com.eloelo/.splash.view.SplashActivityNew for user 0: +1s234ms
03-12 10:00:03.100  1500  1530 I ActivityTaskManager: Displayed com.eloelo/.HomeActivity for user 0: +850ms
";

    fn parser() -> LogcatParser {
        LogcatParser::new(DEFAULT_PACKAGE, &default_activities()).unwrap()
    }

    #[test]
    fn seconds_and_millis_are_combined() {
        assert_eq!(parser().activity_times(DUMP), vec![Some(1234), None, Some(850)]);
    }

    #[test]
    fn missing_activity_is_not_available() {
        let cells: Vec<String> = parser().activity_times(DUMP).into_iter().map(cell).collect();
        assert_eq!(cells, vec!["1234", "N/A", "850"]);
    }

    #[test]
    fn last_launch_wins() {
        let dump = format!(
            "{}I ActivityTaskManager: Displayed com.eloelo/.HomeActivity for user 0: +2s5ms\n",
            DUMP
        );
        assert_eq!(parser().activity_times(&dump)[2], Some(2005));
    }

    #[test]
    fn other_packages_are_ignored() {
        let dump = "I ActivityTaskManager: Displayed com.other/.HomeActivity for user 0: +300ms\n";
        assert_eq!(parser().activity_times(dump), vec![None, None, None]);
    }

    #[test]
    fn older_format_and_longer_names() {
        let dump = "\
I ActivityManager: Displayed com.eloelo/.HomeActivity: +640ms
I ActivityManager: Displayed com.eloelo/.HomeActivityOld: +9s0ms
";
        assert_eq!(parser().activity_times(dump)[2], Some(640));
    }

    #[test]
    fn columns_follow_the_activities() {
        assert_eq!(
            parser().columns(),
            vec!["SplashActivityNew", "OnBoardingActivity", "HomeActivity"]
        );
    }

    #[test]
    fn launch_time_prefers_displayed_over_moto() {
        let p = parser();
        let moto_only = "I MotoDisplay: MotoDisplayed com.connecto/.MainActivity,640\n";
        assert_eq!(p.launch_time(moto_only), Some(640));
        let both = format!(
            "{}I ActivityTaskManager: Displayed com.connecto/.MainActivity: +720ms\n",
            moto_only
        );
        assert_eq!(p.launch_time(&both), Some(720));
        assert_eq!(p.launch_time("nothing here\n"), None);
    }
}

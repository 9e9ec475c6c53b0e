use crate::dashboard::DashboardError;
use crate::dashboard::client::Collections;
use crate::model::city::City;
use crate::model::event::Event;
use crate::model::user::User;
use std::fmt::Write;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Tab {
    #[default]
    Users,
    Cities,
    Events,
}

impl Tab {
    fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Cities => "Cities",
            Self::Events => "Events",
        }
    }
}

/// What the dashboard currently shows. Collections are only ever replaced by a
/// successful batch fetch.
#[derive(Debug, Default)]
pub struct Dashboard {
    data: Collections,
    tab: Tab,
    error: Option<String>,
}

impl Dashboard {
    pub fn select(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Applies the outcome of a batch fetch. On failure the previous collections are kept
    /// and the error is shown instead.
    pub fn apply(&mut self, result: Result<Collections, DashboardError>) {
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("Batch fetch failed: {err}");
                self.error = Some(err.to_string());
            }
        }
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        if let Some(error) = &self.error {
            let _ = writeln!(output, "Error: {error}\n");
        }

        let tabs: Vec<String> = Tab::iter()
            .map(|tab| {
                let label = format!("{} ({})", tab.title(), self.count(tab));
                if tab == self.tab { format!("[{label}]") } else { format!(" {label} ") }
            })
            .collect();
        let _ = writeln!(output, "{}\n", tabs.join(" "));

        match self.tab {
            Tab::Users => render_users(&mut output, &self.data.users),
            Tab::Cities => render_cities(&mut output, &self.data.cities),
            Tab::Events => render_events(&mut output, &self.data.events, &self.data.cities),
        }
        output
    }

    fn count(&self, tab: Tab) -> usize {
        match tab {
            Tab::Users => self.data.users.len(),
            Tab::Cities => self.data.cities.len(),
            Tab::Events => self.data.events.len(),
        }
    }
}

fn render_users(output: &mut String, users: &[User]) {
    if users.is_empty() {
        output.push_str("No users found\n");
    }
    for user in users {
        let _ = writeln!(output, "#{:<5} {:<24} {}", user.id, &*user.name, &*user.privilege);
    }
}

fn render_cities(output: &mut String, cities: &[City]) {
    if cities.is_empty() {
        output.push_str("No cities found\n");
    }
    for city in cities {
        let _ = writeln!(output, "#{:<5} {}", city.id, &*city.name);
    }
}

fn render_events(output: &mut String, events: &[Event], cities: &[City]) {
    if events.is_empty() {
        output.push_str("No events found\n");
    }
    for event in events {
        let city_name = cities
            .iter()
            .find(|city| city.id == event.city_id)
            .map_or("Unknown", |city| &*city.name);
        let _ = writeln!(output, "#{:<5} {} ({}, {})", event.id, &*event.event_name, event.date, city_name);
        let _ = writeln!(output, "       {}", event.description);
        if let Some(rating_id) = event.rating_id {
            let _ = writeln!(output, "       Rating: {rating_id}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::string::SmallString;
    use time::macros::date;

    fn sample() -> Collections {
        Collections {
            users: vec![User {
                id: 1,
                name: SmallString::new("Jonas"),
                privilege: SmallString::new("admin"),
                password: None,
            }],
            cities: vec![City {
                id: 1,
                name: SmallString::new("Vilnius"),
            }],
            events: vec![
                Event {
                    id: 1,
                    event_name: SmallString::new("Jazz Night"),
                    description: String::from("Live music"),
                    date: date!(2025 - 06 - 21),
                    city_id: 1,
                    rating_id: None,
                },
                Event {
                    id: 2,
                    event_name: SmallString::new("Film Festival"),
                    description: String::from("Outdoor screenings"),
                    date: date!(2025 - 08 - 01),
                    city_id: 42,
                    rating_id: Some(3),
                },
            ],
        }
    }

    #[test]
    fn empty() {
        let mut dashboard = Dashboard::default();
        let output = dashboard.render();
        assert!(output.contains("[Users (0)]"));
        assert!(output.contains("No users found"));

        dashboard.select(Tab::Cities);
        assert!(dashboard.render().contains("No cities found"));
        dashboard.select(Tab::Events);
        assert!(dashboard.render().contains("No events found"));
    }

    #[test]
    fn tabs() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(Ok(sample()));

        let output = dashboard.render();
        assert!(output.contains("[Users (1)]  Cities (1)   Events (2) "));
        assert!(output.contains("Jonas"));
        assert!(!output.contains("Vilnius"));

        dashboard.select(Tab::Cities);
        let output = dashboard.render();
        assert!(output.contains("[Cities (1)]"));
        assert!(output.contains("Vilnius"));
    }

    #[test]
    fn events_join_cities() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(Ok(sample()));
        dashboard.select(Tab::Events);

        let output = dashboard.render();
        assert!(output.contains("Jazz Night (2025-06-21, Vilnius)"));
        assert!(output.contains("Film Festival (2025-08-01, Unknown)"));
        assert!(output.contains("Rating: 3"));
    }

    #[test]
    fn failure_keeps_data() {
        let mut dashboard = Dashboard::default();
        dashboard.apply(Ok(sample()));
        dashboard.apply(Err(DashboardError::FailedFetch));

        let output = dashboard.render();
        assert!(output.starts_with("Error: Failed to fetch data from server"));
        assert!(output.contains("Jonas"));

        dashboard.apply(Ok(Collections::default()));
        let output = dashboard.render();
        assert!(!output.contains("Error"));
        assert!(output.contains("No users found"));
    }
}

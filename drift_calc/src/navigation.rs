use itertools::Itertools;

const INDEX_ROUTE: &str = "index.html";

/// Tabs shared by every page of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum NavTab {
    DriftCalc,
    WindStar,
    Weather,
    SpotWind,
    FlightPlan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TabView {
    pub label: &'static str,
    pub route: &'static str,
    pub active: bool,
}

impl NavTab {
    pub const ALL: [NavTab; 5] = [
        NavTab::DriftCalc,
        NavTab::WindStar,
        NavTab::Weather,
        NavTab::SpotWind,
        NavTab::FlightPlan,
    ];

    pub fn route(self) -> &'static str {
        match self {
            NavTab::DriftCalc => INDEX_ROUTE,
            NavTab::WindStar => "windstar.html",
            NavTab::Weather => "weather.html",
            NavTab::SpotWind => "spotwind.html",
            NavTab::FlightPlan => "flightplan.html",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NavTab::DriftCalc => "Drift Calc",
            NavTab::WindStar => "Wind Star",
            NavTab::Weather => "Weather",
            NavTab::SpotWind => "Spot Wind",
            NavTab::FlightPlan => "Flight Plan",
        }
    }

    pub fn active(current_path: &str) -> Option<NavTab> {
        let routes = Self::ALL.map(NavTab::route);
        let route = active_route(current_path, &routes)?;
        Self::ALL.into_iter().find(|tab| tab.route() == route)
    }
}

/// The known route the current path points at. Only the last path segment
/// counts, query and fragment are ignored and an empty segment is the index.
pub(crate) fn active_route<'a>(current_path: &str, known_routes: &[&'a str]) -> Option<&'a str> {
    let path = current_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let page = match path.rsplit('/').next() {
        Some("") | None => INDEX_ROUTE,
        Some(page) => page,
    };
    known_routes.iter().copied().find(|route| *route == page)
}

pub(crate) fn tab_bar(current_path: &str) -> Vec<TabView> {
    let active = NavTab::active(current_path);
    NavTab::ALL
        .into_iter()
        .map(|tab| TabView {
            label: tab.label(),
            route: tab.route(),
            active: Some(tab) == active,
        })
        .collect()
}

/// Single line tab bar for the terminal, the active tab in brackets.
pub(crate) fn format_tab_bar(tabs: &[TabView]) -> String {
    tabs.iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.label)
            } else {
                format!(" {} ", tab.label)
            }
        })
        .join(" ")
}

use std::io::{self, Write};

use askama::Template;
use serde::Serialize;
use wind_triangle::{
    angle::{diff_angle, display_heading},
    solver::{CrosswindDirection, WindTriangleInput, WindTriangleResult},
};

use crate::{
    clock::ClockReadout,
    error::ApplicationResult,
    navigation::{TabView, format_tab_bar, tab_bar},
};

const UNACHIEVABLE_WARNING: &str = "Course cannot be held: the wind is stronger than the airspeed can correct for";

#[derive(Debug, Clone, Serialize)]
pub(crate) struct DriftReport {
    pub clock: Option<ClockReadout>,
    pub local_time_zone: String,
    /// Path of the page being shown, decides the active tab.
    pub page: String,
    pub metar: Option<String>,
    pub input: WindTriangleInput,
    pub result: WindTriangleResult,
}

/// Display strings shared by the text and HTML reports.
#[derive(Debug)]
struct DriftReportView {
    wind_text: String,
    relative_wind_text: String,
    course_text: String,
    airspeed_text: String,
    heading_text: String,
    wca_text: String,
    ground_speed_text: String,
    components_text: String,
    warning: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "drift_report.html")]
struct DriftReportTemplate<'a> {
    clock: Option<&'a ClockReadout>,
    local_time_zone: &'a str,
    tabs: &'a [TabView],
    metar: Option<&'a str>,
    view: &'a DriftReportView,
}

impl DriftReport {
    fn view(&self) -> DriftReportView {
        let input = &self.input;
        let result = &self.result;
        DriftReportView {
            wind_text: format!(
                "{:03}° / {:.0} kt",
                display_heading(input.wind_direction),
                input.wind_speed
            ),
            relative_wind_text: format_relative_wind(input, result),
            course_text: format!("{:03}°", display_heading(input.true_course)),
            airspeed_text: format!("{:.0} kt", input.true_airspeed),
            heading_text: format!("{:03}°", display_heading(result.true_heading)),
            // + 0.0 turns a -0.0 correction into 0.0 before formatting
            wca_text: format!(
                "{:+.1}° (drift {:.1}°)",
                result.wind_correction_angle + 0.0,
                result.drift_angle()
            ),
            ground_speed_text: format!("{:.0} kt", result.ground_speed),
            components_text: format_wind_components(result),
            warning: (!result.achievable).then_some(UNACHIEVABLE_WARNING),
        }
    }

    pub fn render_text(&self) -> String {
        let view = self.view();
        let mut lines = Vec::new();
        if let Some(clock) = &self.clock {
            lines.push(format!(
                "{}   Zulu {}   {} {}",
                clock.date, clock.zulu, self.local_time_zone, clock.local
            ));
            lines.push(format_tab_bar(&tab_bar(&self.page)));
            lines.push(String::new());
        }
        if let Some(metar) = &self.metar {
            lines.push(format!("METAR        {metar}"));
        }
        lines.push(format!("Wind         {}", view.wind_text));
        lines.push(format!("Relative     {}", view.relative_wind_text));
        lines.push(format!("Course       {}", view.course_text));
        lines.push(format!("TAS          {}", view.airspeed_text));
        lines.push(format!("Heading      {}", view.heading_text));
        lines.push(format!("WCA          {}", view.wca_text));
        lines.push(format!("Ground speed {}", view.ground_speed_text));
        lines.push(format!("Components   {}", view.components_text));
        if let Some(warning) = view.warning {
            lines.push(format!("WARNING: {warning}"));
        }
        lines.join("\n")
    }

    pub fn render_json(&self) -> ApplicationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render_html(&self) -> ApplicationResult<String> {
        let view = self.view();
        let tabs = tab_bar(&self.page);
        let tpl = DriftReportTemplate {
            clock: self.clock.as_ref(),
            local_time_zone: &self.local_time_zone,
            tabs: &tabs,
            metar: self.metar.as_deref(),
            view: &view,
        };
        Ok(tpl.render()?)
    }
}

/// Writes the page to a temp file that is kept, and opens it in the browser.
pub(crate) fn open_html_report(html: &str) -> io::Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix("drift_")
        .suffix(".html")
        .rand_bytes(5)
        .tempfile()?;
    file.write_all(html.as_bytes())?;
    open::that_detached(file.path())?;
    file.keep()?;
    Ok(())
}

fn format_relative_wind(input: &WindTriangleInput, result: &WindTriangleResult) -> String {
    let off_nose = diff_angle(input.wind_direction, input.true_course).round();
    if input.wind_speed == 0.0 {
        "calm".to_string()
    } else if off_nose == 0.0 || off_nose == 180.0 {
        format!("{off_nose:.0}° off the nose")
    } else {
        let side = match result.crosswind_direction {
            CrosswindDirection::Left => "left",
            CrosswindDirection::Right => "right",
        };
        format!("{off_nose:.0}° off the nose, from the {side}")
    }
}

fn format_wind_components(result: &WindTriangleResult) -> String {
    const CALM_THRESHOLD: i64 = 0;
    const CALM: &str = "○";
    const HEADWIND: &str = "↑";
    const TAILWIND: &str = "↓";
    const INWARD_FROM_LEFT: &str = "→";
    const INWARD_FROM_RIGHT: &str = "←";

    let headwind = result.headwind_component.round() as i64;
    let crosswind = result.crosswind_component.round() as i64;

    let longitudinal = if headwind > CALM_THRESHOLD {
        format!("{HEADWIND}{headwind:>2}")
    } else if headwind < -CALM_THRESHOLD {
        format!("{TAILWIND}{:>2}", headwind.abs())
    } else {
        format!("{CALM}  ")
    };

    let cross = if crosswind > CALM_THRESHOLD {
        match result.crosswind_direction {
            CrosswindDirection::Left => format!("{INWARD_FROM_LEFT}{crosswind:>2} "),
            CrosswindDirection::Right => format!(" {crosswind:>2}{INWARD_FROM_RIGHT}"),
        }
    } else {
        format!(" {CALM}  ")
    };

    format!("{longitudinal} {cross}")
}

// Menu-driven session.
//
// The session owns the loaded table and the current kommune selection. Every
// menu choice re-filters the table and recomputes its view from scratch.
use crate::commands;
use crate::config::{parse_threshold, ReportConfig};
use crate::error::{ReportError, Result};
use crate::rating::RatingField;
use crate::types::InspectionRecord;
use crate::util::parse_date_safe;
use crate::views::{self, BridgeSelection};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

pub struct Session<R> {
    table: Vec<InspectionRecord>,
    regions: Vec<String>,
    config: ReportConfig,
    input: R,
}

impl<R: BufRead> Session<R> {
    pub fn new(
        table: Vec<InspectionRecord>,
        regions: Vec<String>,
        config: ReportConfig,
        input: R,
    ) -> Self {
        Session {
            table,
            regions,
            config,
            input,
        }
    }

    pub fn selected_regions(&self) -> &[String] {
        &self.regions
    }

    /// Print `label`, read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> Option<String> {
        print!("{}", label);
        let _ = io::stdout().flush();
        let mut buf = String::new();
        match self.input.read_line(&mut buf) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(buf.trim().to_string()),
        }
    }

    fn prompt_field(&mut self) -> Option<RatingField> {
        loop {
            let answer = self.prompt(&format!("Select Element ({}): ", RatingField::codes()))?;
            match answer.parse::<RatingField>() {
                Ok(field) => return Some(field),
                Err(e) => println!("{}", e),
            }
        }
    }

    fn prompt_date(&mut self, label: &str) -> Option<Option<NaiveDate>> {
        loop {
            let answer = self.prompt(label)?;
            if answer.is_empty() {
                return Some(None);
            }
            match parse_date_safe(Some(&answer), &self.config.date_formats) {
                Some(d) => return Some(Some(d)),
                None => println!("{}", ReportError::InvalidDate(answer)),
            }
        }
    }

    /// Blank keeps the configured threshold. Re-asks until the value is usable.
    fn prompt_threshold(&mut self) -> Option<f64> {
        loop {
            let answer = self.prompt(&format!(
                "Threshold (Standard Deviations from Mean) [{}]: ",
                self.config.outlier_threshold
            ))?;
            if answer.is_empty() {
                return Some(self.config.outlier_threshold);
            }
            match parse_threshold(&answer) {
                Ok(v) => return Some(v),
                Err(e) => println!("{}", e),
            }
        }
    }

    fn filtered(&self) -> Vec<InspectionRecord> {
        views::filter_regions(&self.table, &self.regions)
    }

    fn print_menu(&self) {
        println!("Bridge Inspection Analysis");
        if self.regions.is_empty() {
            println!("(Kommune: all)");
        } else {
            println!("(Kommune: {})", self.regions.join(", "));
        }
        println!("[1] Filter by kommune");
        println!("[2] Show raw data");
        println!("[3] Worst condition bridges");
        println!("[4] Trend analysis");
        println!("[5] Average ratings over time");
        println!("[6] Outlier bridge ratings");
        println!("[0] Exit\n");
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu();
            let Some(choice) = self.prompt("Enter choice: ") else {
                return Ok(());
            };
            println!();
            let keep_going = match choice.as_str() {
                "1" => self.choose_regions(),
                "2" => {
                    commands::show_raw(&self.filtered(), &self.config, None)?;
                    true
                }
                "3" => {
                    commands::show_worst(&self.filtered(), self.config.top_n, &self.config, None)?;
                    true
                }
                "4" => self.trend()?,
                "5" => self.intervals()?,
                "6" => self.outliers()?,
                "0" => {
                    println!("Exiting the program.");
                    false
                }
                _ => {
                    println!("Invalid choice. Please enter a number from 0 to 6.\n");
                    true
                }
            };
            if !keep_going {
                return Ok(());
            }
        }
    }

    fn choose_regions(&mut self) -> bool {
        let available = views::regions(&self.table);
        commands::show_list("Kommuner", &available);
        let Some(answer) = self.prompt("Kommune (comma separated, blank for all): ") else {
            return false;
        };
        let (known, unknown): (Vec<String>, Vec<String>) = answer
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .partition(|s| available.contains(s));
        for name in &unknown {
            println!("Unknown kommune ignored: {}", name);
        }
        log::debug!("Kommune selection: {:?}", known);
        self.regions = known;
        println!();
        true
    }

    fn trend(&mut self) -> Result<bool> {
        let Some(bridge) = self.prompt("Select Bridge for Trend Analysis: ") else {
            return Ok(false);
        };
        let Some(field) = self.prompt_field() else {
            return Ok(false);
        };
        commands::show_trend(&self.filtered(), &bridge, field, &self.config, None)?;
        Ok(true)
    }

    fn intervals(&mut self) -> Result<bool> {
        let Some(field) = self.prompt_field() else {
            return Ok(false);
        };
        let Some(bridge) = self.prompt("Select Bridge (blank for All Bridges): ") else {
            return Ok(false);
        };
        let selection = if bridge.is_empty() {
            BridgeSelection::All
        } else {
            BridgeSelection::Bridge(bridge)
        };
        commands::show_intervals(&self.filtered(), field, &selection, &self.config, None)?;
        Ok(true)
    }

    fn outliers(&mut self) -> Result<bool> {
        let Some(field) = self.prompt_field() else {
            return Ok(false);
        };
        let Some(from) = self.prompt_date("Start Date (blank for earliest): ") else {
            return Ok(false);
        };
        let Some(to) = self.prompt_date("End Date (blank for latest): ") else {
            return Ok(false);
        };
        let Some(threshold) = self.prompt_threshold() else {
            return Ok(false);
        };
        commands::show_outliers(&self.filtered(), field, from, to, threshold, &self.config, None)?;
        Ok(true)
    }
}

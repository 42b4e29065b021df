use crate::analyze::{StatisticsSummary, Trend};
use crate::model::{Result, StatsError};
use markdown_builder::Markdown;
use markdown_table::{Heading, HeadingAlignment, MarkdownTable};
use std::fs;
use std::path::Path;

pub trait MarkdownReport {
    fn report_render(&self, username: &str) -> Result<String>;

    fn report_create(&self, username: &str, path: &Path) -> Result<()> {
        fs::write(path, self.report_render(username)?)?;
        Ok(())
    }
}

impl MarkdownReport for StatisticsSummary {
    fn report_render(&self, username: &str) -> Result<String> {
        let mut doc = Markdown::new();

        doc.header1(format!("GitHub statistics for {username}"));
        doc.add_overview(self)?;
        doc.add_languages(self)?;
        doc.add_activity(self)?;
        doc.add_weekly_trends(self)?;

        Ok(doc.render())
    }
}

trait MarkdownExt {
    fn add_overview(&mut self, summary: &StatisticsSummary) -> Result<()>;
    fn add_languages(&mut self, summary: &StatisticsSummary) -> Result<()>;
    fn add_activity(&mut self, summary: &StatisticsSummary) -> Result<()>;
    fn add_weekly_trends(&mut self, summary: &StatisticsSummary) -> Result<()>;
}

impl MarkdownExt for Markdown {
    fn add_overview(&mut self, summary: &StatisticsSummary) -> Result<()> {
        self.header2("Overview".to_string());
        let rows = vec![
            vec![
                "Repositories".to_string(),
                format!(
                    "**{}** (*{} original* / *{} forked*)",
                    summary.repositories.total,
                    summary.repositories.original,
                    summary.repositories.forked
                ),
            ],
            vec!["Stars".to_string(), format!("{}", summary.total_stars)],
            vec!["Contributions".to_string(), format!("{}", summary.contributions)],
            vec![
                "Followers".to_string(),
                format!("{}", summary.followers.total_count),
            ],
            vec![
                "Current streak".to_string(),
                format!("{} day(s)", summary.current_streak),
            ],
            vec![
                "Longest streak".to_string(),
                format!("{} day(s)", summary.longest_streak),
            ],
            vec![
                "Highest commit day".to_string(),
                format!(
                    "{} ({})",
                    summary.highest_commit_day.date, summary.highest_commit_day.count
                ),
            ],
        ];
        self.paragraph(table(&["", ""], rows)?);
        Ok(())
    }

    fn add_languages(&mut self, summary: &StatisticsSummary) -> Result<()> {
        self.header2("Top languages".to_string());
        if summary.top_languages.is_empty() {
            self.paragraph("*No language data*".to_string());
            return Ok(());
        }
        let rows = summary
            .top_languages
            .iter()
            .map(|language| {
                vec![
                    language.name.clone(),
                    format!("`{}`", language.color),
                    format!("{}%", language.percentage),
                ]
            })
            .collect::<Vec<_>>();
        self.paragraph(table(&["Language", "Color", "Share"], rows)?);
        Ok(())
    }

    fn add_activity(&mut self, summary: &StatisticsSummary) -> Result<()> {
        self.header2("Pull requests and issues".to_string());
        let pull_requests = &summary.pull_requests;
        let issues = &summary.issues;
        let rows = vec![
            vec![
                "Pull requests".to_string(),
                format!("{}", pull_requests.total),
                format!("{}", pull_requests.open),
                format!("{}", pull_requests.merged),
                format!("{}", pull_requests.closed),
            ],
            vec![
                "Issues".to_string(),
                format!("{}", issues.total),
                format!("{}", issues.open),
                "-".to_string(),
                format!("{}", issues.closed),
            ],
        ];
        self.paragraph(table(&["", "Total", "Open", "Merged", "Closed"], rows)?);
        Ok(())
    }

    fn add_weekly_trends(&mut self, summary: &StatisticsSummary) -> Result<()> {
        self.header2("Last 7 days".to_string());
        let trends = &summary.weekly_trends;
        let rows = [
            ("Repositories", &trends.repositories),
            ("Stars (estimated)", &trends.stars),
            ("Contributions", &trends.contributions),
            ("Pull requests", &trends.pull_requests),
        ]
        .into_iter()
        .map(|(name, trend)| trend_row(name, trend))
        .collect::<Vec<_>>();
        self.paragraph(table(&["", "This week", "Of all time", ""], rows)?);
        Ok(())
    }
}

fn trend_row(name: &str, trend: &Trend) -> Vec<String> {
    vec![
        name.to_string(),
        format!("{}", trend.value),
        format!("{}%", trend.percentage),
        if trend.is_positive { "↑" } else { "–" }.to_string(),
    ]
}

fn table(headings: &[&str], rows: Vec<Vec<String>>) -> Result<String> {
    let header = headings
        .iter()
        .enumerate()
        .map(|(index, heading)| {
            let alignment = (index > 0).then_some(HeadingAlignment::Center);
            Heading::new(heading.to_string(), alignment)
        })
        .collect::<Vec<_>>();
    let mut md_table = MarkdownTable::new(rows);
    md_table.with_headings(header);
    md_table
        .as_markdown()
        .map_err(|_| StatsError::Render("malformed table".to_string()))
}

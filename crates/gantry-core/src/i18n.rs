use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn text(self, message: Message) -> &'static str {
        match self {
            Language::En => message.en(),
            Language::Zh => message.zh(),
        }
    }

    /// Looks up `message` and substitutes `{key}` placeholders.
    pub fn format(self, message: Message, params: &[(&str, &str)]) -> String {
        let mut out = self.text(message).to_string();
        for (key, value) in params {
            out = out.replace(&format!("{{{key}}}"), value);
        }
        out
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            _ => Err(Error::InvalidLanguage {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-visible strings emitted by the renderer and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    ChartTitle,
    ProjectTimelineHeader,
    ViewDay,
    ViewWeek,
    ViewMonth,
    Zoom,
    EmptyTitle,
    EmptySubtitle,
    Unscheduled,
    Open,
    NoStart,
    NoEnd,
    UnitDays,
    UnitWeeks,
    UnitMonths,
    StatsTotal,
    StatsScheduled,
    StatsUnscheduled,
    NameRequired,
    DateRequired,
    EndBeforeStart,
    DeleteConfirm,
    NoProjectsToExport,
    ImportSuccess,
    ImportError,
}

impl Message {
    fn en(self) -> &'static str {
        match self {
            Message::ChartTitle => "Project Timeline",
            Message::ProjectTimelineHeader => "Project / Timeline",
            Message::ViewDay => "Day",
            Message::ViewWeek => "Week",
            Message::ViewMonth => "Month",
            Message::Zoom => "Zoom",
            Message::EmptyTitle => "No Projects Yet",
            Message::EmptySubtitle => "Add your first project to see it displayed on the timeline",
            Message::Unscheduled => "Unscheduled",
            Message::Open => "Open",
            Message::NoStart => "No start",
            Message::NoEnd => "No end",
            Message::UnitDays => "days",
            Message::UnitWeeks => "weeks",
            Message::UnitMonths => "months",
            Message::StatsTotal => "Total Projects",
            Message::StatsScheduled => "Scheduled",
            Message::StatsUnscheduled => "Unscheduled",
            Message::NameRequired => "Project name is required",
            Message::DateRequired => "Please provide at least one date",
            Message::EndBeforeStart => "End date cannot be earlier than start date",
            Message::DeleteConfirm => {
                "Are you sure you want to delete \"{name}\"? This action cannot be undone."
            }
            Message::NoProjectsToExport => "No projects to export",
            Message::ImportSuccess => "Projects imported successfully!",
            Message::ImportError => "Failed to import projects. Please check the file format.",
        }
    }

    fn zh(self) -> &'static str {
        match self {
            Message::ChartTitle => "项目时间线",
            Message::ProjectTimelineHeader => "项目 / 时间线",
            Message::ViewDay => "按日",
            Message::ViewWeek => "按周",
            Message::ViewMonth => "按月",
            Message::Zoom => "缩放",
            Message::EmptyTitle => "暂无项目",
            Message::EmptySubtitle => "添加您的第一个项目以在时间线上显示",
            Message::Unscheduled => "未排期",
            Message::Open => "待定",
            Message::NoStart => "无开始日期",
            Message::NoEnd => "无结束日期",
            Message::UnitDays => "天",
            Message::UnitWeeks => "周",
            Message::UnitMonths => "月",
            Message::StatsTotal => "项目总数",
            Message::StatsScheduled => "已排期",
            Message::StatsUnscheduled => "未排期",
            Message::NameRequired => "项目名称为必填项",
            Message::DateRequired => "请至少提供一个日期",
            Message::EndBeforeStart => "结束日期不能早于开始日期",
            Message::DeleteConfirm => "确定要删除\"{name}\"吗？此操作无法撤销。",
            Message::NoProjectsToExport => "没有项目可导出",
            Message::ImportSuccess => "项目导入成功！",
            Message::ImportError => "导入项目失败。请检查文件格式。",
        }
    }
}

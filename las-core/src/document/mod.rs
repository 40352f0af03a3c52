//! 文档模型
//!
//! 一次解析产出一个 [`Document`]：段按出现顺序保存，`~A` 的数据行放在 [`LogData`]。
//! 解析完成后文档只读；`is_wrapped` 与 `version` 首次调用时计算并缓存。

pub mod log_data;
pub mod section;

pub use log_data::LogData;
pub use section::{Line, Section, SectionName};

use once_cell::sync::OnceCell;
use serde::Serialize;

use section::eq_ignore_case;

/// A parsed LAS file
#[derive(Debug, Default, Serialize)]
pub struct Document {
    sections: Vec<Section>,
    logs: LogData,
    /// 第一个段头之前的注释
    comments: Vec<String>,
    #[serde(skip)]
    wrapped: OnceCell<bool>,
    #[serde(skip)]
    version: OnceCell<String>,
}

impl Document {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn logs(&self) -> &LogData {
        &self.logs
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// 按名称查找段（忽略大小写，线性查找）
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.is_named(name))
    }

    pub fn version_information(&self) -> Option<&Section> {
        self.section(SectionName::Version.as_str())
    }

    pub fn well_information(&self) -> Option<&Section> {
        self.section(SectionName::Well.as_str())
    }

    pub fn curve_information(&self) -> Option<&Section> {
        self.section(SectionName::Curve.as_str())
    }

    pub fn parameter_information(&self) -> Option<&Section> {
        self.section(SectionName::Parameter.as_str())
    }

    pub fn other_information(&self) -> Option<&Section> {
        self.section(SectionName::Other.as_str())
    }

    /// `WRAP` line of Version Information
    pub fn wrap_line(&self) -> Option<&Line> {
        self.version_information()?.line("WRAP")
    }

    /// `VERS` line of Version Information
    pub fn version_line(&self) -> Option<&Line> {
        self.version_information()?.line("VERS")
    }

    /// `WRAP` 的数据为 `YES`（忽略大小写）时为真；缺失视为假
    pub fn is_wrapped(&self) -> bool {
        *self.wrapped.get_or_init(|| {
            self.wrap_line()
                .is_some_and(|line| eq_ignore_case(&line.data, "YES"))
        })
    }

    /// `VERS` 的数据；缺失时为空串
    pub fn version(&self) -> &str {
        self.version.get_or_init(|| {
            self.version_line()
                .map(|line| line.data.clone())
                .unwrap_or_default()
        })
    }

    /// Mnemonic of every Curve Information line, in order
    pub fn curve_mnemonics(&self) -> Vec<String> {
        self.curve_information()
            .map(|section| section.mnemonics().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    /// 用曲线助记符作为日志列名
    pub fn with_curve_headers(mut self) -> Self {
        let headers = self.curve_mnemonics();
        self.logs = std::mem::take(&mut self.logs).with_headers(headers);
        self
    }

    pub(crate) fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub(crate) fn push_comment(&mut self, comment: String) {
        self.comments.push(comment);
    }

    pub(crate) fn logs_mut(&mut self) -> &mut LogData {
        &mut self.logs
    }
}

use serde::Serialize;

/// Rows of the `~A` section, one per physical data line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogData {
    /// 列名，由调用方提供，不做校验
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LogData {
    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按空白拆分一行原始数据；空行不产生数据行
    pub(crate) fn push_raw(&mut self, raw: &str) {
        let row: Vec<String> = raw.split_whitespace().map(str::to_owned).collect();
        if !row.is_empty() {
            self.rows.push(row);
        }
    }
}

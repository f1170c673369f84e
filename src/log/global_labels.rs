use crate::log::label::Label;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// 全局标签集合
///
/// 附加在每一条日志事件上的键值对（位于 logger 标签之后、事件自定义标签之前）。
/// 整体替换通过原子指针交换完成：并发读取方要么看到旧集合要么看到新集合，
/// 不会看到替换了一半的集合
#[derive(Debug, Default)]
pub struct GlobalLabels {
    labels: ArcSwap<Vec<Label>>,
}

impl GlobalLabels {
    pub fn new(labels: Vec<Label>) -> Self {
        Self {
            labels: ArcSwap::from_pointee(labels),
        }
    }

    /// 获取当前全局标签的副本
    pub fn get(&self) -> Vec<Label> {
        self.labels.load().as_ref().clone()
    }

    /// 整体替换全局标签
    pub fn set(&self, labels: Vec<Label>) {
        self.labels.store(Arc::new(labels));
    }

    /// 获取当前快照（不复制标签）
    pub fn snapshot(&self) -> Arc<Vec<Label>> {
        self.labels.load_full()
    }
}

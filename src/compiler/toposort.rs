//! 依赖图 + 拓扑排序
//!
//! 每条规则指向其直接依赖的子规则（links）。反复取出 links 为空的一批规则追加到结果，
//! 再把它们从剩余规则的 links 中删除，直到图为空。
//! 某轮没有可取的规则而图仍非空，说明剩余规则中存在环；剩余集合作为诊断信息返回，
//! 它可能包含只是依赖环、本身不在环上的规则。
//!
//! 复杂度 O(V·E)，规则数量通常只有几十到几百条，不在热路径上。

use std::collections::{BTreeMap, BTreeSet};

use crate::rule::RuleName;

/// 规则依赖图（DAG）
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph<'a> {
    // 节点 -> 尚未满足的直接依赖；BTree 保证同批次内顺序稳定
    nodes: BTreeMap<&'a RuleName, BTreeSet<&'a RuleName>>,
}

impl<'a> DependencyGraph<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加节点及其直接依赖
    pub fn add_node<I>(&mut self, node: &'a RuleName, links: I)
    where
        I: IntoIterator<Item = &'a RuleName>,
    {
        self.nodes.entry(node).or_default().extend(links);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 拓扑排序，依赖总排在被依赖者之后
    ///
    /// 出现环时返回剩余未能消解的规则名（已排序）。
    pub fn toposort(mut self) -> Result<Vec<&'a RuleName>, Vec<&'a RuleName>> {
        let mut result = Vec::with_capacity(self.nodes.len());

        while !self.nodes.is_empty() {
            let next_nodes = self.nodes_without_links();

            // 存在环
            if next_nodes.is_empty() {
                return Err(self.nodes.into_keys().collect());
            }

            for node in next_nodes {
                self.nodes.remove(node);
                for links in self.nodes.values_mut() {
                    links.remove(node);
                }
                result.push(node);
            }
        }

        Ok(result)
    }

    // 当前没有未满足依赖的节点
    fn nodes_without_links(&self) -> Vec<&'a RuleName> {
        self.nodes
            .iter()
            .filter(|(_, links)| links.is_empty())
            .map(|(node, _)| *node)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<RuleName> {
        raw.iter().map(|n| RuleName::new(*n).unwrap()).collect()
    }

    fn position(order: &[&RuleName], name: &str) -> usize {
        order.iter().position(|n| n.as_str() == name).unwrap()
    }

    #[test]
    fn test_toposort_chain() {
        let n = names(&["A", "B", "C"]);
        let mut graph = DependencyGraph::new();
        graph.add_node(&n[0], [&n[1]]);
        graph.add_node(&n[1], [&n[2]]);
        graph.add_node(&n[2], []);

        let order = graph.toposort().unwrap();
        let order: Vec<&str> = order.iter().map(|n| n.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_toposort_diamond() {
        let n = names(&["TOP", "LEFT", "RIGHT", "BOTTOM", "ALONE"]);
        let mut graph = DependencyGraph::new();
        graph.add_node(&n[0], [&n[1], &n[2]]);
        graph.add_node(&n[1], [&n[3]]);
        graph.add_node(&n[2], [&n[3]]);
        graph.add_node(&n[3], []);
        graph.add_node(&n[4], []);

        let order = graph.toposort().unwrap();
        assert_eq!(order.len(), 5);
        assert!(position(&order, "BOTTOM") < position(&order, "LEFT"));
        assert!(position(&order, "BOTTOM") < position(&order, "RIGHT"));
        assert!(position(&order, "LEFT") < position(&order, "TOP"));
        assert!(position(&order, "RIGHT") < position(&order, "TOP"));
    }

    #[test]
    fn test_toposort_cycle_reports_remaining() {
        let n = names(&["ONE", "TWO", "TRE", "USER", "LEAF"]);
        let mut graph = DependencyGraph::new();
        graph.add_node(&n[0], [&n[1]]);
        graph.add_node(&n[1], [&n[2]]);
        graph.add_node(&n[2], [&n[0]]);
        // USER 依赖环但不在环上，也会出现在剩余集合中
        graph.add_node(&n[3], [&n[0], &n[4]]);
        graph.add_node(&n[4], []);

        let remaining = graph.toposort().unwrap_err();
        let remaining: Vec<&str> = remaining.iter().map(|n| n.as_str()).collect();
        assert_eq!(remaining, vec!["ONE", "TRE", "TWO", "USER"]);
    }

    #[test]
    fn test_toposort_empty() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert!(graph.toposort().unwrap().is_empty());
    }
}

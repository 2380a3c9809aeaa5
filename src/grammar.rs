//! 语法：一组相关、可能互相依赖的规则
//!
//! 生命周期只有两个状态：
//! - `Open`：可以添加规则，可以尝试编译
//! - `Finalized`：全部规则已展开并编译，只读，可并发查询
//!
//! 编译是全有或全无的：任何一步失败都不会提交部分结果，语法保持 `Open`，
//! 补齐缺失规则后可以再次调用 [`Grammar::finalize`]。

use std::time::Instant;

use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::compiler::{interpolate, CompiledPattern, DependencyGraph, PatternCompiler};
use crate::config::GrammarConfig;
use crate::error::{GrammarError, GrammarResult};
use crate::rule::{scan, Rule, RuleName, RuleSummary};
use crate::utils::{normalize, preview_compact, preview_names, PATTERN_PREVIEW_LEN};

/// 语法生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarState {
    Open,
    Finalized,
}

/// 规则容器，子规则在编译前以字符串插值方式展开
#[derive(Debug, Clone)]
pub struct Grammar {
    name: String,
    rules: FxHashMap<RuleName, Rule>,
    state: GrammarState,
    compiler: PatternCompiler,
    // 最近一次成功编译使用的求值顺序
    order: Vec<RuleName>,
}

// 编译过程的中间产物，成功后一次性提交
struct Resolved {
    order: Vec<RuleName>,
    compiled: Vec<(RuleName, CompiledPattern)>,
}

impl Grammar {
    /// 使用默认配置创建语法
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, GrammarConfig::default())
    }

    /// 使用自定义引擎配置创建语法
    pub fn with_config(name: impl Into<String>, config: GrammarConfig) -> Self {
        Self {
            name: name.into(),
            rules: FxHashMap::default(),
            state: GrammarState::Open,
            compiler: PatternCompiler::new(config),
            order: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> GrammarState {
        self.state
    }

    pub fn is_finalized(&self) -> bool {
        self.state == GrammarState::Finalized
    }

    pub fn config(&self) -> &GrammarConfig {
        self.compiler.config()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    // ======================== 规则注册 ========================

    /// 添加规则，模式文本先去掉注释与空白
    pub fn add(&mut self, name: &str, pattern: &str) -> GrammarResult<()> {
        self.add_rule(name, pattern, true)
    }

    /// 添加规则，模式文本原样保留；用于空白有意义的场景
    pub fn add_verbatim(&mut self, name: &str, pattern: &str) -> GrammarResult<()> {
        self.add_rule(name, pattern, false)
    }

    /// 添加规则，`trim` 决定是否规整模式文本
    ///
    /// 检查顺序：规则名合法 → 语法未编译 → 名称未占用 → 子规则名合法 → 不引用自身。
    pub fn add_rule(&mut self, name: &str, pattern: &str, trim: bool) -> GrammarResult<()> {
        let Some(rule_name) = RuleName::new(name) else {
            return Err(GrammarError::InvalidName {
                grammar: self.name.clone(),
                rule: name.to_string(),
            });
        };

        self.ensure_open()?;

        if self.rules.contains_key(name) {
            return Err(GrammarError::DuplicateName {
                grammar: self.name.clone(),
                rule: name.to_string(),
            });
        }

        let pattern = if trim { normalize(pattern) } else { pattern.to_string() };

        let mut subrules: Vec<RuleName> = Vec::new();
        for candidate in scan(&pattern) {
            let Some(subrule) = RuleName::new(candidate) else {
                return Err(GrammarError::InvalidSubruleName {
                    grammar: self.name.clone(),
                    rule: name.to_string(),
                    subrule: candidate.to_string(),
                });
            };
            if !subrules.contains(&subrule) {
                subrules.push(subrule);
            }
        }

        if subrules.contains(&rule_name) {
            return Err(GrammarError::SelfReference {
                grammar: self.name.clone(),
                rule: name.to_string(),
            });
        }

        trace!(
            "grammar {:?}: add rule {:?} (trim: {}), subrules {}, pattern {}",
            self.name,
            name,
            trim,
            preview_names(&subrules),
            preview_compact(&pattern, PATTERN_PREVIEW_LEN)
        );

        self.rules
            .insert(rule_name.clone(), Rule::new(rule_name, pattern, subrules));
        Ok(())
    }

    // ======================== 编译 ========================

    /// 解析依赖、展开子规则并编译全部规则
    ///
    /// 1. 所有引用的子规则必须存在（编译开始前检查）
    /// 2. 计算拓扑顺序，存在环则失败
    /// 3. 按顺序展开并编译，遇到第一个语法错误即中止
    pub fn finalize(&mut self) -> GrammarResult<()> {
        self.ensure_open()?;

        let start = Instant::now();
        debug!("grammar {:?}: finalizing {} rules", self.name, self.rules.len());

        let resolved = match self.resolve() {
            Ok(resolved) => resolved,
            Err(err) => {
                warn!("grammar {:?}: finalize failed: {}", self.name, err);
                return Err(err);
            }
        };

        for (name, pattern) in resolved.compiled {
            if let Some(rule) = self.rules.get_mut(&name) {
                rule.compiled = Some(pattern);
            }
        }
        self.order = resolved.order;
        self.state = GrammarState::Finalized;

        debug!(
            "grammar {:?}: finalized {} rules in {:?}",
            self.name,
            self.rules.len(),
            start.elapsed()
        );
        Ok(())
    }

    fn resolve(&self) -> GrammarResult<Resolved> {
        self.check_missing()?;

        let mut graph = DependencyGraph::new();
        for (name, rule) in &self.rules {
            graph.add_node(name, rule.subrules.iter());
        }

        let order = graph.toposort().map_err(|remaining| GrammarError::CyclicDependency {
            grammar: self.name.clone(),
            remaining: remaining.into_iter().map(RuleName::to_string).collect(),
        })?;
        trace!("grammar {:?}: evaluation order {}", self.name, preview_names(&order));

        // 子规则名 -> 已编译结果；依赖总是先于使用者处理
        let mut done: FxHashMap<&str, CompiledPattern> = FxHashMap::default();

        for name in &order {
            let rule = self
                .rules
                .get(name.as_str())
                .ok_or_else(|| self.invariant(format!("ordered rule {:?} not in grammar", name)))?;

            let expanded = interpolate(&rule.pattern, |sub| {
                done.get(sub).map(CompiledPattern::as_str)
            })
            .map_err(|missing| {
                self.invariant(format!("rule {:?} expanded before subrule {:?}", name, missing))
            })?;

            let regex = self
                .compiler
                .compile(&expanded)
                .map_err(|source| GrammarError::PatternSyntaxError {
                    grammar: self.name.clone(),
                    rule: name.to_string(),
                    source,
                })?;

            trace!(
                "grammar {:?}: rule {:?} expanded to {}",
                self.name,
                name.as_str(),
                preview_compact(&expanded, PATTERN_PREVIEW_LEN)
            );
            done.insert(name.as_str(), CompiledPattern::new(regex, expanded));
        }

        let compiled = order
            .iter()
            .filter_map(|name| {
                done.remove(name.as_str())
                    .map(|pattern| ((*name).clone(), pattern))
            })
            .collect();

        Ok(Resolved {
            order: order.into_iter().cloned().collect(),
            compiled,
        })
    }

    // 所有引用的子规则必须已添加；按规则名顺序检查，报错稳定
    fn check_missing(&self) -> GrammarResult<()> {
        let mut rules: Vec<&Rule> = self.rules.values().collect();
        rules.sort_by(|a, b| a.name.cmp(&b.name));

        for rule in rules {
            if let Some(missing) = rule
                .subrules
                .iter()
                .find(|sub| !self.rules.contains_key(sub.as_str()))
            {
                return Err(GrammarError::MissingRule {
                    grammar: self.name.clone(),
                    rule: rule.name.to_string(),
                    subrule: missing.to_string(),
                });
            }
        }
        Ok(())
    }

    // ======================== 查询 ========================

    /// 查询已编译的规则
    pub fn lookup(&self, name: &str) -> GrammarResult<&CompiledPattern> {
        let rule = self.rules.get(name).ok_or_else(|| GrammarError::UnknownRule {
            grammar: self.name.clone(),
            rule: name.to_string(),
        })?;

        if !self.is_finalized() {
            return Err(GrammarError::NotFinalized {
                grammar: self.name.clone(),
            });
        }

        rule.compiled
            .as_ref()
            .ok_or_else(|| self.invariant(format!("finalized rule {:?} has no pattern", name)))
    }

    /// 查询已编译的正则
    pub fn rx(&self, name: &str) -> GrammarResult<&Regex> {
        self.lookup(name).map(CompiledPattern::regex)
    }

    /// 查询展开后的模式文本
    pub fn expanded(&self, name: &str) -> GrammarResult<&str> {
        self.lookup(name).map(CompiledPattern::as_str)
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// 规则直接依赖的子规则
    pub fn subrules(&self, name: &str) -> GrammarResult<&[RuleName]> {
        self.rules
            .get(name)
            .map(Rule::subrules)
            .ok_or_else(|| GrammarError::UnknownRule {
                grammar: self.name.clone(),
                rule: name.to_string(),
            })
    }

    /// 全部规则名（按名称排序）
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(RuleName::as_str).collect();
        names.sort_unstable();
        names
    }

    /// 编译时使用的求值顺序，依赖总在使用者之前
    pub fn evaluation_order(&self) -> GrammarResult<&[RuleName]> {
        if !self.is_finalized() {
            return Err(GrammarError::NotFinalized {
                grammar: self.name.clone(),
            });
        }
        Ok(&self.order)
    }

    /// 全部规则概要（按名称排序）
    pub fn summary(&self) -> Vec<RuleSummary> {
        let mut summary: Vec<RuleSummary> = self.rules.values().map(Rule::summary).collect();
        summary.sort_by(|a, b| a.name.cmp(&b.name));
        summary
    }

    // ======================== 内部 ========================

    // 统一的状态检查，所有修改操作先经过这里
    fn ensure_open(&self) -> GrammarResult<()> {
        match self.state {
            GrammarState::Open => Ok(()),
            GrammarState::Finalized => Err(GrammarError::AlreadyFinalized {
                grammar: self.name.clone(),
            }),
        }
    }

    fn invariant(&self, detail: String) -> GrammarError {
        GrammarError::InvariantViolation {
            grammar: self.name.clone(),
            detail,
        }
    }
}

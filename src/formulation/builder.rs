//! Builds the arc-based VRPTW MIP from an instance.

use tracing::{debug, warn};

use super::{BigM, Comparison, LinearConstraint, LinearExpr, VarLayout, Variable};
use crate::models::Instance;

/// Variables, base constraints and objective of the VRPTW model.
///
/// The formulation holds only the constraints known up front. Sub-tour
/// elimination cuts found during search live in the session's cut pool.
#[derive(Debug, Clone)]
pub struct Formulation {
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
    layout: VarLayout,
    big_m: BigM,
}

impl Formulation {
    /// Variables indexed by column.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Minimisation objective `Σ dist(i,j)·x(i,j)`.
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    pub fn layout(&self) -> &VarLayout {
        &self.layout
    }

    pub fn big_m(&self) -> BigM {
        self.big_m
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.evaluate(values)
    }

    /// Names of the bounds and constraints violated by a full assignment.
    pub fn violations(&self, values: &[f64], tolerance: f64) -> Vec<&str> {
        let mut names = Vec::new();
        for (var, &value) in self.variables.iter().zip(values) {
            if value < var.lower - tolerance || value > var.upper + tolerance {
                names.push(var.name.as_str());
            }
        }
        names.extend(
            self.constraints
                .iter()
                .filter(|c| !c.is_satisfied(values, tolerance))
                .map(LinearConstraint::name),
        );
        names
    }
}

/// Constructs the [`Formulation`] for an [`Instance`].
///
/// Produces, for `n` nodes with depot 0:
/// - binary `x(i,j)` for every ordered pair `i ≠ j`
/// - continuous `t(i) ∈ [ready(i), due(i)]`, `u(i) ∈ [demand(i), Q]`, `u(0) = 0`
/// - out/in degree 1 for every customer
/// - fleet bound `Σ x(0,j) ≤ K` (when `K` is set) and depot flow balance
/// - big-M time and load propagation on every arc entering a customer
///
/// # Examples
///
/// ```
/// use u_vrptw::formulation::FormulationBuilder;
/// use u_vrptw::models::{Instance, Node, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let instance = Instance::new(
///     vec![
///         Node::depot(0.0, 0.0, tw),
///         Node::new(1, 1.0, 0.0, 1.0, tw, 0.0),
///         Node::new(2, 0.0, 1.0, 1.0, tw, 0.0),
///     ],
///     10.0,
/// )
/// .unwrap();
///
/// let formulation = FormulationBuilder::new(&instance).build();
/// // 6 arcs + 3 times + 3 loads
/// assert_eq!(formulation.num_variables(), 12);
/// ```
pub struct FormulationBuilder<'a> {
    instance: &'a Instance,
    big_m: Option<BigM>,
}

impl<'a> FormulationBuilder<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            big_m: None,
        }
    }

    /// Overrides the derived big-M constants.
    pub fn with_big_m(mut self, big_m: BigM) -> Self {
        self.big_m = Some(big_m);
        self
    }

    pub fn build(self) -> Formulation {
        let instance = self.instance;
        let n = instance.num_nodes();
        let derived = BigM::derive(instance);
        let big_m = match self.big_m {
            Some(m) => {
                if !m.dominates(&derived) {
                    warn!(
                        component = "formulation",
                        operation = "big_m",
                        time = m.time,
                        load = m.load,
                        derived_time = derived.time,
                        derived_load = derived.load,
                        "Big-M override below derived bound may cut off feasible routes"
                    );
                }
                m
            }
            None => derived,
        };

        let layout = VarLayout::new(n);
        let variables = variables(instance, &layout);
        let mut constraints = Vec::new();
        degree_constraints(n, &layout, &mut constraints);
        depot_constraints(instance, &layout, &mut constraints);
        propagation_constraints(instance, &layout, big_m, &mut constraints);

        let objective = layout
            .arcs()
            .iter()
            .map(|&(i, j, id)| (id, instance.distance(i, j)))
            .collect();

        debug!(
            component = "formulation",
            operation = "build",
            instance = instance.name(),
            nodes = n as u64,
            variables = variables.len() as u64,
            constraints = constraints.len() as u64,
            big_m_time = big_m.time,
            big_m_load = big_m.load,
            "Built VRPTW formulation"
        );

        Formulation {
            variables,
            constraints,
            objective,
            layout,
            big_m,
        }
    }
}

fn variables(instance: &Instance, layout: &VarLayout) -> Vec<Variable> {
    let n = instance.num_nodes();
    let mut vars = Vec::with_capacity(layout.num_variables());
    for &(i, j, _) in layout.arcs() {
        vars.push(Variable::binary(format!("x[{i},{j}]")));
    }
    for i in 0..n {
        let node = instance.node(i);
        vars.push(Variable::continuous(format!("t[{i}]"), node.ready(), node.due()));
    }
    vars.push(Variable::continuous("u[0]".to_string(), 0.0, 0.0));
    for i in 1..n {
        vars.push(Variable::continuous(
            format!("u[{i}]"),
            instance.node(i).demand(),
            instance.capacity(),
        ));
    }
    vars
}

fn degree_constraints(n: usize, layout: &VarLayout, out: &mut Vec<LinearConstraint>) {
    for i in 1..n {
        let outgoing = (0..n).filter_map(|j| layout.arc(i, j)).map(|id| (id, 1.0)).collect();
        out.push(LinearConstraint::new(
            format!("out_degree[{i}]"),
            outgoing,
            Comparison::Equal,
            1.0,
        ));
        let incoming = (0..n).filter_map(|j| layout.arc(j, i)).map(|id| (id, 1.0)).collect();
        out.push(LinearConstraint::new(
            format!("in_degree[{i}]"),
            incoming,
            Comparison::Equal,
            1.0,
        ));
    }
}

fn depot_constraints(instance: &Instance, layout: &VarLayout, out: &mut Vec<LinearConstraint>) {
    let n = instance.num_nodes();
    if let Some(k) = instance.fleet_size() {
        let leaving = (1..n).filter_map(|j| layout.arc(0, j)).map(|id| (id, 1.0)).collect();
        out.push(LinearConstraint::new("fleet", leaving, Comparison::LessEqual, k as f64));
    }
    let mut balance = LinearExpr::new();
    for j in 1..n {
        if let (Some(leave), Some(enter)) = (layout.arc(0, j), layout.arc(j, 0)) {
            balance.add_term(leave, 1.0);
            balance.add_term(enter, -1.0);
        }
    }
    out.push(LinearConstraint::new("depot_balance", balance, Comparison::Equal, 0.0));
}

fn propagation_constraints(
    instance: &Instance,
    layout: &VarLayout,
    big_m: BigM,
    out: &mut Vec<LinearConstraint>,
) {
    for &(i, j, arc) in layout.arcs() {
        if j == 0 {
            continue;
        }
        let from = instance.node(i);
        let to = instance.node(j);

        // t(j) - t(i) - M_t x(i,j) >= s(i) + d(i,j) - M_t
        let time = LinearExpr::new()
            .with_term(layout.time(j), 1.0)
            .with_term(layout.time(i), -1.0)
            .with_term(arc, -big_m.time);
        out.push(LinearConstraint::new(
            format!("time[{i},{j}]"),
            time,
            Comparison::GreaterEqual,
            from.service() + instance.distance(i, j) - big_m.time,
        ));

        // u(j) - u(i) - M_c x(i,j) >= q(j) - M_c
        let load = LinearExpr::new()
            .with_term(layout.load(j), 1.0)
            .with_term(layout.load(i), -1.0)
            .with_term(arc, -big_m.load);
        out.push(LinearConstraint::new(
            format!("load[{i},{j}]"),
            load,
            Comparison::GreaterEqual,
            to.demand() - big_m.load,
        ));
    }
}

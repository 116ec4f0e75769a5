use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::Program,
        expressions::{BinaryExpr, BinaryOperator, Expr, PrefixOperator},
        statements::{DeclStmt, NameRef, Stmt},
        types::TypeTag,
    },
    errors::errors::{Error, ErrorImpl, SemanticResult},
    Position,
};

/// The symbol table: one flat namespace, each name declared at most once.
#[derive(Debug, Default, Clone)]
pub struct Environment {
    pub variable_lookup: HashMap<String, TypeTag>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn declare_variable(
        &mut self,
        variable_name: &str,
        variable_type: TypeTag,
        current_position: Position,
    ) -> SemanticResult<()> {
        if self.variable_lookup.contains_key(variable_name) {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: variable_name.to_string(),
                },
                current_position,
            ));
        }

        trace!(variable = variable_name, ty = %variable_type, "declared");
        self.variable_lookup
            .insert(variable_name.to_string(), variable_type);
        Ok(())
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<TypeTag> {
        self.variable_lookup.get(variable_name).copied()
    }

    /// Like `get_variable`, but an unknown name is an error at `current_position`.
    pub fn fetch_variable_type(
        &self,
        variable_name: &str,
        current_position: Position,
    ) -> SemanticResult<TypeTag> {
        self.get_variable(variable_name).ok_or_else(|| {
            Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: variable_name.to_string(),
                },
                current_position,
            )
        })
    }

    pub fn len(&self) -> usize {
        self.variable_lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variable_lookup.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct TypeChecker {
    pub environment: Environment,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker::default()
    }

    fn declare(&mut self, name: &NameRef, type_tag: TypeTag) -> SemanticResult<()> {
        self.environment
            .declare_variable(&name.name, type_tag, name.position)
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, ast: &Expr) -> SemanticResult<TypeTag> {
    match ast {
        Expr::Symbol(symbol) => type_checker
            .environment
            .fetch_variable_type(&symbol.value, symbol.position),
        Expr::Number(number) => Ok(if number.is_real() {
            TypeTag::Real
        } else {
            TypeTag::Integer
        }),
        Expr::Boolean(_) => Ok(TypeTag::Boolean),
        Expr::Prefix(prefix) => match prefix.operator {
            PrefixOperator::Not => {
                let operand = type_check_expr(type_checker, &prefix.right_expr)?;
                if operand != TypeTag::Boolean {
                    return Err(Error::new(
                        ErrorImpl::NotOperandError { received: operand },
                        prefix.right_expr.get_position(),
                    ));
                }
                Ok(TypeTag::Boolean)
            }
        },
        Expr::Binary(binary) => type_check_binary(type_checker, binary),
    }
}

/// Binary operator errors are reported at the left operand.
fn type_check_binary(type_checker: &mut TypeChecker, binary: &BinaryExpr) -> SemanticResult<TypeTag> {
    let left = type_check_expr(type_checker, &binary.left)?;
    let right = type_check_expr(type_checker, &binary.right)?;
    let operator = binary.operator;
    let position = binary.left.get_position();

    if operator.is_arithmetic() {
        if !left.is_numeric() || !right.is_numeric() {
            return Err(Error::new(
                ErrorImpl::ArithmeticOperandError {
                    operator: operator.to_string(),
                    left,
                    right,
                },
                position,
            ));
        }
        if operator == BinaryOperator::Div && left == TypeTag::Integer {
            return Err(Error::new(
                ErrorImpl::InvalidDividend { received: left },
                position,
            ));
        }

        Ok(if left == TypeTag::Real || right == TypeTag::Real {
            TypeTag::Real
        } else {
            TypeTag::Integer
        })
    } else if operator.is_logical() {
        if left != TypeTag::Boolean || right != TypeTag::Boolean {
            return Err(Error::new(
                ErrorImpl::LogicalOperandError {
                    operator: operator.to_string(),
                    left,
                    right,
                },
                position,
            ));
        }
        Ok(TypeTag::Boolean)
    } else {
        // Comparisons: no implicit widening, integer and real do not compare.
        if left != right {
            return Err(Error::new(
                ErrorImpl::ComparisonTypeMismatch {
                    operator: operator.to_string(),
                    left,
                    right,
                },
                position,
            ));
        }
        Ok(TypeTag::Boolean)
    }
}

fn expect_condition(
    type_checker: &mut TypeChecker,
    condition: &Expr,
    construct: &str,
    position: Position,
) -> SemanticResult<()> {
    let received = type_check_expr(type_checker, condition)?;
    if received != TypeTag::Boolean {
        return Err(Error::new(
            ErrorImpl::ConditionNotBoolean {
                construct: construct.to_string(),
                received,
            },
            position,
        ));
    }
    Ok(())
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, ast: &Stmt) -> SemanticResult<()> {
    match ast {
        Stmt::Compound(compound) => {
            for stmt in compound.iter() {
                type_check_stmt(type_checker, stmt)?;
            }
            Ok(())
        }
        Stmt::Assign(assign) => {
            let expected = type_checker
                .environment
                .fetch_variable_type(&assign.identifier, assign.position)?;
            let received = type_check_expr(type_checker, &assign.value)?;

            if !expected.accepts(received) {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError { expected, received },
                    assign.position,
                ));
            }
            Ok(())
        }
        Stmt::If(if_stmt) => {
            expect_condition(type_checker, &if_stmt.condition, "if", if_stmt.position)?;
            type_check_stmt(type_checker, &if_stmt.then_body)?;
            if let Some(else_body) = &if_stmt.else_body {
                type_check_stmt(type_checker, else_body)?;
            }
            Ok(())
        }
        Stmt::While(while_stmt) => {
            expect_condition(
                type_checker,
                &while_stmt.condition,
                "while",
                while_stmt.condition.get_position(),
            )?;
            type_check_stmt(type_checker, &while_stmt.body)
        }
        Stmt::For(for_stmt) => {
            if let Some(init) = &for_stmt.init {
                type_check_expr(type_checker, init)?;
            }
            if let Some(condition) = &for_stmt.condition {
                expect_condition(type_checker, condition, "for", condition.get_position())?;
            }
            if let Some(increment) = &for_stmt.increment {
                type_check_expr(type_checker, increment)?;
            }
            type_check_stmt(type_checker, &for_stmt.body)
        }
        Stmt::Input(input) => {
            for name in input.names.iter() {
                type_checker
                    .environment
                    .fetch_variable_type(&name.name, name.position)?;
            }
            Ok(())
        }
        Stmt::Output(output) => {
            type_check_expr(type_checker, &output.value)?;
            Ok(())
        }
    }
}

pub fn type_check_declaration(type_checker: &mut TypeChecker, ast: &DeclStmt) -> SemanticResult<()> {
    for name in ast.names.iter() {
        type_checker.declare(name, ast.type_tag)?;
    }
    Ok(())
}

/// Checks the whole program, stopping at the first error.
pub fn type_check_program(type_checker: &mut TypeChecker, ast: &Program) -> SemanticResult<()> {
    type_check_declaration(type_checker, &ast.declaration)?;

    for stmt in ast.iter() {
        type_check_stmt(type_checker, stmt)?;
    }

    debug!(symbols = type_checker.environment.len(), "type checking finished");
    Ok(())
}

/// Type checks a program with a fresh symbol table, stopping at the first error.
pub fn type_check(ast: &Program) -> (TypeChecker, Option<Error>) {
    let mut type_checker = TypeChecker::new();
    let result = type_check_program(&mut type_checker, ast);

    (type_checker, result.err())
}

/// Type checks a program with a fresh symbol table and returns every error found.
///
/// Each redeclared name and each failing top-level statement contributes
/// one error; checking resumes with the next name or statement. An empty
/// list means the program is well typed.
pub fn analyze(ast: &Program) -> Vec<Error> {
    let mut type_checker = TypeChecker::new();
    let mut errors = vec![];

    for name in ast.declaration.names.iter() {
        if let Err(error) = type_checker.declare(name, ast.declaration.type_tag) {
            errors.push(error);
        }
    }

    for stmt in ast.iter() {
        if let Err(error) = type_check_stmt(&mut type_checker, stmt) {
            errors.push(error);
        }
    }

    debug!(
        symbols = type_checker.environment.len(),
        errors = errors.len(),
        "analysis finished"
    );
    errors
}

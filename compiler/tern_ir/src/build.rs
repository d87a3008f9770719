//! Programmatic AST construction.
//!
//! Front ends allocate straight into an [`Ast`]. `AstBuilder` is the
//! convenience layer used by embedders and tests: it interns names and hands
//! every node a distinct synthetic span so diagnostics stay attributable.

use crate::{
    Ast, BinaryOp, CallExpr, ConstructionError, FieldInit, FieldPattern, FieldType, FunctionDef,
    GenericParam, MatchArm, Name, NodeId, NodeKind, PatternId, PatternKind, Purity, Span,
    StringInterner, TypeExprId, TypeExprKind, UnaryOp,
};

/// Builder that owns an [`Ast`] under construction.
pub struct AstBuilder<'a> {
    ast: Ast,
    interner: &'a StringInterner,
    offset: u32,
}

impl<'a> AstBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        AstBuilder {
            ast: Ast::new(),
            interner,
            offset: 0,
        }
    }

    /// Intern a name.
    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    fn span(&mut self) -> Span {
        let start = self.offset;
        self.offset = self.offset.saturating_add(1);
        Span::new(start, self.offset)
    }

    /// Builders for record kinds go through the validating allocators.
    fn node(&mut self, kind: NodeKind) -> NodeId {
        let span = self.span();
        self.ast.push_node(kind, span)
    }

    /// Span assigned to a node.
    pub fn span_of(&self, id: NodeId) -> Span {
        self.ast.node(id).span
    }

    /// Span assigned to a pattern.
    pub fn pattern_span(&self, id: PatternId) -> Span {
        self.ast.pattern(id).span
    }

    /// Finish with the given top-level statements.
    pub fn finish(mut self, statements: Vec<NodeId>) -> Ast {
        self.ast.set_module(statements);
        self.ast
    }

    // Literals and references

    pub fn int(&mut self, value: i64) -> NodeId {
        self.node(NodeKind::Int(value))
    }

    pub fn str(&mut self, value: &str) -> NodeId {
        let name = self.name(value);
        self.node(NodeKind::Str(name))
    }

    pub fn bool(&mut self, value: bool) -> NodeId {
        self.node(NodeKind::Bool(value))
    }

    pub fn unit(&mut self) -> NodeId {
        self.node(NodeKind::Unit)
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        let name = self.name(name);
        self.node(NodeKind::Ident(name))
    }

    // Operators

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.node(NodeKind::Binary { op, lhs, rhs })
    }

    pub fn add(&mut self, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.binary(BinaryOp::Add, lhs, rhs)
    }

    pub fn unary(&mut self, op: UnaryOp, operand: NodeId) -> NodeId {
        self.node(NodeKind::Unary { op, operand })
    }

    // Records

    pub fn record(&mut self, fields: &[(&str, NodeId)]) -> Result<NodeId, ConstructionError> {
        let fields = fields
            .iter()
            .map(|&(name, value)| {
                let span = self.span();
                FieldInit {
                    name: self.name(name),
                    value,
                    span,
                }
            })
            .collect();
        let span = self.span();
        self.ast.alloc_record(fields, span)
    }

    pub fn field(&mut self, record: NodeId, field: &str) -> NodeId {
        let field = self.name(field);
        self.node(NodeKind::Field { record, field })
    }

    // Functions

    pub fn generic(&mut self, name: &str, constraint: Option<TypeExprId>) -> GenericParam {
        GenericParam {
            name: self.name(name),
            constraint,
            span: self.span(),
        }
    }

    pub fn function(
        &mut self,
        purity: Purity,
        generics: Vec<GenericParam>,
        params: Vec<PatternId>,
        return_type: Option<TypeExprId>,
        body: NodeId,
    ) -> NodeId {
        self.node(NodeKind::Function(FunctionDef {
            purity,
            generics,
            params,
            return_type,
            body,
        }))
    }

    /// Pure, non-generic function without a return annotation.
    pub fn lambda(&mut self, params: Vec<PatternId>, body: NodeId) -> NodeId {
        self.function(Purity::Pure, Vec::new(), params, None, body)
    }

    pub fn call(&mut self, callee: NodeId, permission: Purity, args: Vec<NodeId>) -> NodeId {
        self.call_with_types(callee, permission, Vec::new(), args)
    }

    pub fn call_with_types(
        &mut self,
        callee: NodeId,
        permission: Purity,
        type_args: Vec<TypeExprId>,
        args: Vec<NodeId>,
    ) -> NodeId {
        self.node(NodeKind::Call(CallExpr {
            callee,
            permission,
            type_args,
            args,
        }))
    }

    // Control flow

    pub fn if_else(&mut self, cond: NodeId, then_branch: NodeId, else_branch: NodeId) -> NodeId {
        self.node(NodeKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn match_expr(&mut self, scrutinee: NodeId, arms: &[(PatternId, NodeId)]) -> NodeId {
        let arms = arms
            .iter()
            .map(|&(pattern, body)| MatchArm {
                pattern,
                body,
                span: self.span(),
            })
            .collect();
        self.node(NodeKind::Match { scrutinee, arms })
    }

    pub fn block(&mut self, statements: Vec<NodeId>) -> NodeId {
        self.node(NodeKind::Block(statements))
    }

    // Statements

    pub fn let_(&mut self, pattern: PatternId, value: NodeId) -> NodeId {
        self.node(NodeKind::Let {
            pattern,
            value,
            export: false,
        })
    }

    pub fn export(&mut self, pattern: PatternId, value: NodeId) -> NodeId {
        self.node(NodeKind::Let {
            pattern,
            value,
            export: true,
        })
    }

    /// `let name = value`
    pub fn let_name(&mut self, name: &str, value: NodeId) -> NodeId {
        let pattern = self.bind(name);
        self.let_(pattern, value)
    }

    pub fn type_alias(&mut self, name: &str, ty: TypeExprId) -> NodeId {
        let name = self.name(name);
        self.node(NodeKind::TypeAlias { name, ty })
    }

    pub fn ret(&mut self, value: NodeId) -> NodeId {
        self.node(NodeKind::Return(value))
    }

    pub fn print(&mut self, value: NodeId) -> NodeId {
        self.node(NodeKind::Print(value))
    }

    pub fn assert_as(&mut self, expr: NodeId, ty: TypeExprId) -> NodeId {
        self.node(NodeKind::Assert { expr, ty })
    }

    pub fn import(&mut self, pattern: PatternId, path: &str) -> NodeId {
        let path = self.name(path);
        self.node(NodeKind::Import { pattern, path })
    }

    // Patterns

    pub fn bind(&mut self, name: &str) -> PatternId {
        let name = self.name(name);
        let span = self.span();
        self.ast.push_pattern(
            PatternKind::Bind {
                name,
                annotation: None,
            },
            span,
        )
    }

    pub fn bind_typed(&mut self, name: &str, ty: TypeExprId) -> PatternId {
        let name = self.name(name);
        let span = self.span();
        self.ast.push_pattern(
            PatternKind::Bind {
                name,
                annotation: Some(ty),
            },
            span,
        )
    }

    pub fn record_pattern(
        &mut self,
        fields: &[(&str, PatternId)],
    ) -> Result<PatternId, ConstructionError> {
        let fields = fields
            .iter()
            .map(|&(name, pattern)| FieldPattern {
                name: self.name(name),
                pattern,
            })
            .collect();
        let span = self.span();
        self.ast.alloc_record_pattern(fields, span)
    }

    pub fn constrained(&mut self, pattern: PatternId, condition: NodeId) -> PatternId {
        let span = self.span();
        self.ast
            .push_pattern(PatternKind::Constrained { pattern, condition }, span)
    }

    // Type expressions

    pub fn named_type(&mut self, name: &str) -> TypeExprId {
        let name = self.name(name);
        let span = self.span();
        self.ast.push_type(TypeExprKind::Named(name), span)
    }

    pub fn record_type(
        &mut self,
        fields: &[(&str, TypeExprId)],
    ) -> Result<TypeExprId, ConstructionError> {
        let fields = fields
            .iter()
            .map(|&(name, ty)| FieldType {
                name: self.name(name),
                ty,
            })
            .collect();
        let span = self.span();
        self.ast.alloc_record_type(fields, span)
    }

    pub fn function_type(
        &mut self,
        purity: Purity,
        generics: Vec<GenericParam>,
        params: Vec<TypeExprId>,
        ret: TypeExprId,
    ) -> TypeExprId {
        let span = self.span();
        self.ast.push_type(
            TypeExprKind::Function {
                purity,
                generics,
                params,
                ret,
            },
            span,
        )
    }
}

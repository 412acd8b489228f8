//! Type parsing.
//!
//! This module extends Parser with methods for parsing type expressions.
//! Returns `ParsedType` which captures the full structure of type annotations.

use ori_ir::{ParsedType, TokenKind, TypeId};

use crate::Parser;

impl Parser<'_> {
    /// Parse a type expression.
    /// Returns a `ParsedType` representing the full type structure.
    pub(crate) fn parse_type(&mut self) -> Option<ParsedType> {
        if self.check_type_keyword() {
            let kind = self.current().kind.clone();
            self.advance();
            match kind {
                TokenKind::IntType => Some(ParsedType::primitive(TypeId::INT)),
                TokenKind::FloatType => Some(ParsedType::primitive(TypeId::FLOAT)),
                TokenKind::BoolType => Some(ParsedType::primitive(TypeId::BOOL)),
                TokenKind::StrType => Some(ParsedType::primitive(TypeId::STR)),
                TokenKind::CharType => Some(ParsedType::primitive(TypeId::CHAR)),
                TokenKind::ByteType => Some(ParsedType::primitive(TypeId::BYTE)),
                TokenKind::Void => Some(ParsedType::primitive(TypeId::VOID)),
                TokenKind::NeverType => Some(ParsedType::primitive(TypeId::NEVER)),
                _ => None,
            }
        } else if self.check(&TokenKind::SelfUpper) {
            // Self type - used in trait/impl contexts
            self.advance();
            // Check for associated type access: Self.Item
            if self.check(&TokenKind::Dot) {
                self.advance(); // consume .
                if self.check_ident() {
                    let assoc_name = if let TokenKind::Ident(n) = &self.current().kind {
                        *n
                    } else {
                        return Some(ParsedType::SelfType);
                    };
                    self.advance();
                    Some(ParsedType::associated_type(
                        ParsedType::SelfType,
                        assoc_name,
                    ))
                } else {
                    Some(ParsedType::SelfType)
                }
            } else {
                Some(ParsedType::SelfType)
            }
        } else if self.check_ident() {
            // Named type (possibly generic like Option<T>)
            let name = if let TokenKind::Ident(n) = &self.current().kind {
                *n
            } else {
                return None;
            };
            self.advance();
            // Check for generic parameters
            let type_args = self.parse_optional_generic_args_full();
            let base_type = ParsedType::Named { name, type_args };

            // Check for associated type access: T.Item
            if self.check(&TokenKind::Dot) {
                self.advance(); // consume .
                if self.check_ident() {
                    let assoc_name = if let TokenKind::Ident(n) = &self.current().kind {
                        *n
                    } else {
                        return Some(base_type);
                    };
                    self.advance();
                    Some(ParsedType::associated_type(base_type, assoc_name))
                } else {
                    Some(base_type)
                }
            } else {
                Some(base_type)
            }
        } else if self.check(&TokenKind::LBracket) {
            // [T] list type
            self.advance(); // [
            let inner = self.parse_type()?;
            if self.check(&TokenKind::RBracket) {
                self.advance(); // ]
            }
            Some(ParsedType::list(inner))
        } else if self.check(&TokenKind::LBrace) {
            // {K: V} map type
            self.parse_map_type()
        } else if self.check(&TokenKind::LParen) {
            // (T, U) tuple or () unit or (T) -> U function type
            self.parse_paren_type()
        } else {
            None
        }
    }

    /// Parse optional generic arguments: `<T, U, ...>`
    /// Returns an empty Vec if no generic arguments are present.
    fn parse_optional_generic_args_full(&mut self) -> Vec<ParsedType> {
        if !self.check(&TokenKind::Lt) {
            return Vec::new();
        }
        self.advance(); // <

        let mut args = Vec::new();

        // Parse comma-separated type arguments
        while !self.check(&TokenKind::Gt) && !self.is_at_end() {
            if let Some(ty) = self.parse_type() {
                args.push(ty);
            }
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }

        if self.check(&TokenKind::Gt) {
            self.advance(); // >
        }

        args
    }

    /// Parse map type: {K: V}
    fn parse_map_type(&mut self) -> Option<ParsedType> {
        self.advance(); // {

        // Parse key type
        let key = self.parse_type()?;

        // Expect colon
        if self.check(&TokenKind::Colon) {
            self.advance();
        }

        // Parse value type
        let value = self.parse_type()?;

        // Expect closing brace
        if self.check(&TokenKind::RBrace) {
            self.advance();
        }

        Some(ParsedType::map(key, value))
    }

    /// Parse parenthesized types: unit `()`, tuple `(T, U)`, or function `(T) -> U`
    fn parse_paren_type(&mut self) -> Option<ParsedType> {
        self.advance(); // (

        // Empty parens: () unit or () -> T function type
        if self.check(&TokenKind::RParen) {
            self.advance(); // )
                            // Check for -> (function type: () -> T)
            if self.check(&TokenKind::Arrow) {
                self.advance();
                let ret = self.parse_type()?;
                return Some(ParsedType::function(Vec::new(), ret));
            }
            // () is unit (empty tuple)
            return Some(ParsedType::unit());
        }

        // Parse first element (could be tuple or function param)
        let mut elements = Vec::new();
        if let Some(first) = self.parse_type() {
            elements.push(first);
        }

        // Collect remaining elements if tuple
        while self.check(&TokenKind::Comma) {
            self.advance();
            if self.check(&TokenKind::RParen) {
                break; // trailing comma
            }
            if let Some(ty) = self.parse_type() {
                elements.push(ty);
            }
        }

        if self.check(&TokenKind::RParen) {
            self.advance();
        }

        // Check for -> (function type)
        if self.check(&TokenKind::Arrow) {
            self.advance();
            let ret = self.parse_type()?;
            return Some(ParsedType::function(elements, ret));
        }

        // If single element without arrow, it could be a parenthesized type or 1-tuple
        // We treat it as a tuple for consistency
        Some(ParsedType::tuple(elements))
    }
}

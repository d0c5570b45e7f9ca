//! Parsing and printing of generated component modules, backed by swc.

use std::io;

use miette::NamedSource;
use swc_common::comments::SingleThreadedComments;
use swc_common::input::StringInput;
use swc_common::{sync::Lrc, FileName, SourceFile, SourceMap, Spanned};
use swc_ecma_ast::{EsVersion, Module};
use swc_ecma_codegen::text_writer::JsWriter;
use swc_ecma_codegen::Emitter;
use swc_ecma_parser::error::Error as SwcError;
use swc_ecma_parser::lexer::Lexer;
use swc_ecma_parser::{Parser, Syntax, TsSyntax};

use crate::error::{RefineError, Result};

const SOURCE_NAME: &str = "<generated>";

/// A parsed module together with the comments and source map needed to
/// print it back.
pub struct SyntaxTree {
    pub module: Module,
    comments: SingleThreadedComments,
    source_map: Lrc<SourceMap>,
}

impl SyntaxTree {
    /// Parses `source` as TSX. Any error the parser reports, including the
    /// ones it could recover from, fails the whole parse.
    pub fn parse(source: &str) -> Result<Self> {
        let source_map: Lrc<SourceMap> = Default::default();
        let file = source_map.new_source_file(
            FileName::Custom(SOURCE_NAME.into()).into(),
            source.to_string(),
        );
        let comments = SingleThreadedComments::default();

        let (module, recovered) = {
            let lexer = Lexer::new(
                syntax(),
                EsVersion::EsNext,
                StringInput::from(&*file),
                Some(&comments),
            );
            let mut parser = Parser::new_from(lexer);
            let module = parser.parse_module();
            (module, parser.take_errors())
        };

        let module = match module {
            Ok(module) => module,
            Err(err) => return Err(parse_error(&source_map, &file, source, err)),
        };
        if let Some(err) = recovered.into_iter().next() {
            return Err(parse_error(&source_map, &file, source, err));
        }

        Ok(Self {
            module,
            comments,
            source_map,
        })
    }

    pub fn print(&self) -> Result<String> {
        let mut buf = Vec::new();
        // Leaves astral characters such as emoji unescaped
        let mut cfg = swc_ecma_codegen::Config::default();
        cfg.target = EsVersion::EsNext;
        {
            let mut emitter = Emitter {
                cfg,
                cm: self.source_map.clone(),
                comments: Some(&self.comments),
                wr: JsWriter::new(self.source_map.clone(), "\n", &mut buf, None),
            };
            emitter.emit_module(&self.module)?;
        }
        String::from_utf8(buf)
            .map_err(|err| RefineError::Emit(io::Error::new(io::ErrorKind::InvalidData, err)))
    }
}

fn syntax() -> Syntax {
    Syntax::Typescript(TsSyntax {
        tsx: true,
        decorators: true,
        ..Default::default()
    })
}

fn parse_error(source_map: &SourceMap, file: &SourceFile, source: &str, err: SwcError) -> RefineError {
    let span = err.span();
    let loc = source_map.lookup_char_pos(span.lo);
    let start = (span.lo.0.saturating_sub(file.start_pos.0) as usize).min(source.len());
    let end = (span.hi.0.saturating_sub(file.start_pos.0) as usize).clamp(start, source.len());

    RefineError::Parse {
        message: err.into_kind().msg().into_owned(),
        line: loc.line,
        column: loc.col.0 + 1,
        src: NamedSource::new(SOURCE_NAME, source.to_string()),
        span: (start, end - start).into(),
    }
}

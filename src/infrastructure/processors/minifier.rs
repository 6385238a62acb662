use crate::core::interfaces::ChunkMinifier;
use crate::core::models::MinifyOptions;
use crate::infrastructure::processors::PropertyMangler;
use crate::utils::{Result, ShiboriError};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use std::sync::Arc;

/// JavaScript minification using oxc: parse, compress, mangle, codegen,
/// then the property-mangling pass over the generated text.
pub struct OxcMinifier {
    options: MinifyOptions,
    property_mangler: Option<PropertyMangler>,
}

impl OxcMinifier {
    pub fn new(options: MinifyOptions) -> Result<Self> {
        let property_mangler = match &options.property_pattern {
            Some(pattern) => Some(PropertyMangler::new(pattern, &options.reserved)?),
            None => None,
        };

        Ok(Self {
            options,
            property_mangler,
        })
    }

    pub fn minify(&self, source_code: &str, file_name: &str) -> Result<String> {
        let allocator = Allocator::default();
        let source_type =
            SourceType::from_path(file_name).unwrap_or_else(|_| SourceType::default());

        let parser = Parser::new(&allocator, source_code, source_type);
        let parse_result = parser.parse();

        if !parse_result.errors.is_empty() {
            let errors: Vec<String> = parse_result
                .errors
                .iter()
                .map(|e| format!("Parse error: {}", e))
                .collect();
            return Err(ShiboriError::minify(file_name, errors.join("\n")));
        }

        let mut program = parse_result.program;
        let minifier = Minifier::new(MinifierOptions {
            mangle: self.options.mangle.then(MangleOptions::default),
            compress: Some(CompressOptions::default()),
        });
        let minifier_return = minifier.minify(&allocator, &mut program);

        // strip_comments doubles as the compact-output switch: comments only
        // survive the non-minified formatting path.
        let codegen_options = CodegenOptions {
            minify: self.options.strip_comments,
            ..Default::default()
        };

        let minified_code = Codegen::new()
            .with_options(codegen_options)
            .with_scoping(minifier_return.scoping)
            .build(&program)
            .code;

        match &self.property_mangler {
            Some(mangler) => Ok(mangler.rewrite(&minified_code)),
            None => Ok(minified_code),
        }
    }
}

/// Async facade for the build pipeline. Minification is CPU-bound, so each
/// call runs on the blocking pool; the pipeline awaits one chunk at a time.
pub struct MinificationService {
    minifier: Arc<OxcMinifier>,
}

impl MinificationService {
    pub fn new(options: MinifyOptions) -> Result<Self> {
        Ok(Self {
            minifier: Arc::new(OxcMinifier::new(options)?),
        })
    }
}

#[async_trait::async_trait]
impl ChunkMinifier for MinificationService {
    async fn minify(&self, source: &str, file_name: &str) -> Result<String> {
        let minifier = self.minifier.clone();
        let source = source.to_string();
        let file_name = file_name.to_string();

        tokio::task::spawn_blocking(move || minifier.minify(&source, &file_name))
            .await
            .map_err(|e| ShiboriError::build(format!("Minification task failed: {}", e)))?
    }
}

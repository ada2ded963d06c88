//! Eclipse compiler problem severities applied to every project.

/// `(key, value)` pairs merged into the JDT preferences after `eclipse`.
pub const COMPILER_PROBLEMS: &[(&str, &str)] = &[
    ("org.eclipse.jdt.core.compiler.annotation.inheritNullAnnotations", "disabled"),
    ("org.eclipse.jdt.core.compiler.annotation.missingNonNullByDefaultAnnotation", "ignore"),
    ("org.eclipse.jdt.core.compiler.annotation.nonnull.secondary", "org.eclipse.jdt.annotation.NonNull"),
    ("org.eclipse.jdt.core.compiler.annotation.nonnull", "org.eclipse.jdt.annotation.NonNull"),
    ("org.eclipse.jdt.core.compiler.annotation.nonnullbydefault.secondary", "org.eclipse.jdt.annotation.NonNullByDefault"),
    ("org.eclipse.jdt.core.compiler.annotation.nonnullbydefault", "org.eclipse.jdt.annotation.NonNullByDefault"),
    ("org.eclipse.jdt.core.compiler.annotation.nullable.secondary", "org.eclipse.jdt.annotation.Nullable"),
    ("org.eclipse.jdt.core.compiler.annotation.nullable", "org.eclipse.jdt.annotation.Nullable"),
    ("org.eclipse.jdt.core.compiler.annotation.nullanalysis", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.APILeak", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.annotationSuperInterface", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.autoboxing", "ignore"),
    ("org.eclipse.jdt.core.compiler.problem.comparingIdentical", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.deadCode", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.deprecation", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.deprecationInDeprecatedCode", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.deprecationWhenOverridingDeprecatedMethod", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.discouragedReference", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.emptyStatement", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.explicitlyClosedAutoCloseable", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.fallthroughCase", "ignore"),
    ("org.eclipse.jdt.core.compiler.problem.fatalOptionalError", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.fieldHiding", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.finalParameterBound", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.finallyBlockNotCompletingNormally", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.forbiddenReference", "error"),
    ("org.eclipse.jdt.core.compiler.problem.hiddenCatchBlock", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.includeNullInfoFromAsserts", "enabled"),
    ("org.eclipse.jdt.core.compiler.problem.incompatibleNonInheritedInterfaceMethod", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.incompleteEnumSwitch", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.indirectStaticAccess", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.localVariableHiding", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.methodWithConstructorName", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.missingDefaultCase", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.missingDeprecatedAnnotation", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.missingEnumCaseDespiteDefault", "enabled"),
    ("org.eclipse.jdt.core.compiler.problem.missingHashCodeMethod", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.missingOverrideAnnotation", "ignore"),
    ("org.eclipse.jdt.core.compiler.problem.missingOverrideAnnotationForInterfaceMethodImplementation", "enabled"),
    ("org.eclipse.jdt.core.compiler.problem.missingSerialVersion", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.missingSynchronizedOnInheritedMethod", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.noEffectAssignment", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.noImplicitStringConversion", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.nonExternalizedStringLiteral", "ignore"),
    ("org.eclipse.jdt.core.compiler.problem.nonnullParameterAnnotationDropped", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.nonnullTypeVariableFromLegacyInvocation", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.nullAnnotationInferenceConflict", "error"),
    ("org.eclipse.jdt.core.compiler.problem.nullReference", "error"),
    ("org.eclipse.jdt.core.compiler.problem.nullSpecViolation", "error"),
    ("org.eclipse.jdt.core.compiler.problem.nullUncheckedConversion", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.overridingPackageDefaultMethod", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.parameterAssignment", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.pessimisticNullAnalysisForFreeTypeVariables", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.possibleAccidentalBooleanAssignment", "ignore"),
    ("org.eclipse.jdt.core.compiler.problem.potentialNullReference", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.potentiallyUnclosedCloseable", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.rawTypeReference", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.redundantNullAnnotation", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.redundantNullCheck", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.redundantSpecificationOfTypeArguments", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.redundantSuperinterface", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.reportMethodCanBePotentiallyStatic", "ignore"),
    ("org.eclipse.jdt.core.compiler.problem.reportMethodCanBeStatic", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.specialParameterHidingField", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.staticAccessReceiver", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.suppressOptionalErrors", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.suppressWarnings", "enabled"),
    ("org.eclipse.jdt.core.compiler.problem.syntacticNullAnalysisForFields", "enabled"),
    ("org.eclipse.jdt.core.compiler.problem.syntheticAccessEmulation", "info"),
    ("org.eclipse.jdt.core.compiler.problem.terminalDeprecation", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.typeParameterHiding", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unavoidableGenericTypeProblems", "enabled"),
    ("org.eclipse.jdt.core.compiler.problem.uncheckedTypeOperation", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unclosedCloseable", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.undocumentedEmptyBlock", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unhandledWarningToken", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unlikelyCollectionMethodArgumentType", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unlikelyCollectionMethodArgumentTypeStrict", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.unlikelyEqualsArgumentType", "info"),
    ("org.eclipse.jdt.core.compiler.problem.unnecessaryElse", "ignore"),
    ("org.eclipse.jdt.core.compiler.problem.unnecessaryTypeCheck", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unqualifiedFieldAccess", "ignore"),
    ("org.eclipse.jdt.core.compiler.problem.unstableAutoModuleName", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedDeclaredThrownException", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedDeclaredThrownExceptionExemptExceptionAndThrowable", "enabled"),
    ("org.eclipse.jdt.core.compiler.problem.unusedDeclaredThrownExceptionIncludeDocCommentReference", "enabled"),
    ("org.eclipse.jdt.core.compiler.problem.unusedDeclaredThrownExceptionWhenOverriding", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.unusedExceptionParameter", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedImport", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedLabel", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedLocal", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedObjectAllocation", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedParameter", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedParameterIncludeDocCommentReference", "enabled"),
    ("org.eclipse.jdt.core.compiler.problem.unusedParameterWhenImplementingAbstract", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.unusedParameterWhenOverridingConcrete", "disabled"),
    ("org.eclipse.jdt.core.compiler.problem.unusedPrivateMember", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedTypeParameter", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.unusedWarningToken", "warning"),
    ("org.eclipse.jdt.core.compiler.problem.varargsArgumentNeedCast", "warning"),
    ("org.eclipse.jdt.core.compiler.release", "disabled"),
];
